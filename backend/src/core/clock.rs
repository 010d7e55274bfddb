//! Simulated clock
//!
//! The simulation advances in rounds. Inside a round, pauses (transaction
//! latency, maintenance downtime, pacing between actor-rounds) move a
//! simulated millisecond counter forward. Nothing here reads wall-clock time,
//! so timestamps are identical across replays of the same seed.

use serde::{Deserialize, Serialize};

/// Milliseconds since the start of a run
pub type Timestamp = u64;

/// Tracks the current round and elapsed simulated time
///
/// # Example
/// ```
/// use atm_simulator_core::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_round(), 0);
///
/// clock.begin_round();
/// clock.advance(500);
/// assert_eq!(clock.current_round(), 1);
/// assert_eq!(clock.now(), 500);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    /// Rounds started so far (1-based once the first round begins)
    current_round: usize,
    /// Simulated milliseconds elapsed
    elapsed_ms: Timestamp,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the next round and return its 1-based index
    pub fn begin_round(&mut self) -> usize {
        self.current_round += 1;
        self.current_round
    }

    /// Move simulated time forward
    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Current simulated timestamp
    pub fn now(&self) -> Timestamp {
        self.elapsed_ms
    }
}

/// Render a timestamp as `[t+SS.mmms]` for reporting
pub fn format_timestamp(ts: Timestamp) -> String {
    format!("[t+{}.{:03}s]", ts / 1000, ts % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_pads_millis() {
        assert_eq!(format_timestamp(0), "[t+0.000s]");
        assert_eq!(format_timestamp(12_045), "[t+12.045s]");
    }

    #[test]
    fn test_advance_saturates() {
        let mut clock = SimClock::new();
        clock.advance(u64::MAX);
        clock.advance(10);
        assert_eq!(clock.now(), u64::MAX);
    }
}
