//! Tests for deterministic RNG
//!
//! CRITICAL: Same seed MUST produce same sequence.

use atm_simulator_core::{RandomSource, RngManager};

#[test]
fn test_rng_new_with_seed() {
    let rng = RngManager::new(12345);
    assert_eq!(rng.get_state(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next(), rng2.next(), "RNG not deterministic!");
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    assert_ne!(
        rng1.next(),
        rng2.next(),
        "Different seeds should produce different values"
    );
}

#[test]
fn test_rng_range_inclusive() {
    let mut rng = RngManager::new(12345);

    for _ in 0..100 {
        let val = rng.range_inclusive(0, 99);
        assert!((0..100).contains(&val), "Value {} out of range [0, 99]", val);
    }
}

#[test]
fn test_rng_range_inclusive_single_value() {
    let mut rng = RngManager::new(12345);
    assert_eq!(rng.range_inclusive(5, 5), 5);
}

#[test]
fn test_index_stays_in_bounds() {
    let mut rng = RngManager::new(31337);

    for len in 1..20 {
        for _ in 0..20 {
            assert!(rng.index(len) < len);
        }
    }
}

#[test]
fn test_step_range_deterministic() {
    let mut rng1 = RngManager::new(99999);
    let mut rng2 = RngManager::new(99999);

    for _ in 0..50 {
        assert_eq!(
            rng1.step_range(100, 5000, 100),
            rng2.step_range(100, 5000, 100),
            "step_range() not deterministic!"
        );
    }
}

#[test]
fn test_range_inclusive_covers_small_interval() {
    let mut rng = RngManager::new(7);
    let mut seen = [false; 5];

    for _ in 0..500 {
        let v = rng.range_inclusive(1, 5);
        seen[(v - 1) as usize] = true;
    }

    assert!(seen.iter().all(|s| *s), "every interval in 1..=5 should appear");
}

#[test]
fn test_rng_state_advances() {
    let mut rng = RngManager::new(12345);
    let initial_state = rng.get_state();

    rng.next();
    assert_ne!(initial_state, rng.get_state(), "RNG state should advance");
}
