//! Random source abstraction used by the orchestrator.

/// Source of randomness for every decision the simulation makes.
///
/// Only `next_u64` is required. The derived draws have default
/// implementations on top of it, and a scripted source may override them
/// to return exact values.
pub trait RandomSource {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform f64 in [0.0, 1.0)
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform index in [0, len)
    ///
    /// # Panics
    /// Panics if `len` is zero
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be positive");
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform integer in [min, max]
    ///
    /// # Panics
    /// Panics if min > max
    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");
        let span = (max - min) as u64 + 1;
        min + (self.next_u64() % span) as i64
    }

    /// Uniform multiple of `step` in [min, max]
    ///
    /// `min` is rounded up and `max` rounded down to the nearest multiple.
    fn step_range(&mut self, min: i64, max: i64, step: i64) -> i64 {
        assert!(step > 0, "step must be positive");
        let lo = (min + step - 1).div_euclid(step);
        let hi = max.div_euclid(step);
        self.range_inclusive(lo, hi) * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts upward from a start value
    struct Counter(u64);

    impl RandomSource for Counter {
        fn next_u64(&mut self) -> u64 {
            let v = self.0;
            self.0 += 1;
            v
        }
    }

    #[test]
    fn test_index_wraps_modulo_len() {
        let mut src = Counter(7);
        assert_eq!(src.index(3), 1);
        assert_eq!(src.index(3), 2);
        assert_eq!(src.index(3), 0);
    }

    #[test]
    fn test_range_inclusive_hits_upper_bound() {
        let mut src = Counter(4);
        // span of 5: value 4 maps to max
        assert_eq!(src.range_inclusive(10, 14), 14);
    }

    #[test]
    fn test_step_range_yields_multiples() {
        let mut src = Counter(0);
        for _ in 0..50 {
            let v = src.step_range(1000, 5000, 100);
            assert_eq!(v % 100, 0);
            assert!((1000..=5000).contains(&v));
        }
    }

    #[test]
    #[should_panic(expected = "len must be positive")]
    fn test_index_zero_len_panics() {
        Counter(0).index(0);
    }
}
