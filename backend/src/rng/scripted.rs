//! Scripted random source for reproducing exact scenarios.

use super::{RandomSource, RngManager};
use std::collections::VecDeque;

/// One pre-recorded draw.
///
/// The variant must match the kind of draw the simulation asks for next:
/// `Index` for actor/action selection, `Int` for `range_inclusive`,
/// `Amount` for stepped amounts and `Unit` for probability checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Index(usize),
    Int(i64),
    Amount(i64),
    Unit(f64),
}

impl Draw {
    fn kind(&self) -> &'static str {
        match self {
            Draw::Index(_) => "Index",
            Draw::Int(_) => "Int",
            Draw::Amount(_) => "Amount",
            Draw::Unit(_) => "Unit",
        }
    }
}

/// Replays a fixed sequence of draws, then falls back to a seeded generator.
///
/// # Example
/// ```
/// use atm_simulator_core::rng::{Draw, RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(vec![Draw::Index(1), Draw::Amount(500)]);
/// assert_eq!(rng.index(3), 1);
/// assert_eq!(rng.step_range(100, 1000, 100), 500);
/// assert!(rng.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: VecDeque<Draw>,
    fallback: RngManager,
}

impl ScriptedRng {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self::with_fallback_seed(draws, 1)
    }

    pub fn with_fallback_seed(draws: Vec<Draw>, seed: u64) -> Self {
        Self {
            draws: draws.into(),
            fallback: RngManager::new(seed),
        }
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.draws.is_empty()
    }

    /// Pop the next draw, panicking if it is not of the expected kind.
    fn take(&mut self, expected: &'static str) -> Option<Draw> {
        let draw = self.draws.pop_front()?;
        assert_eq!(
            draw.kind(),
            expected,
            "scripted draw mismatch: expected {}, found {:?}",
            expected,
            draw
        );
        Some(draw)
    }
}

impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        self.fallback.next()
    }

    fn next_f64(&mut self) -> f64 {
        match self.take("Unit") {
            Some(Draw::Unit(v)) => v,
            _ => self.fallback.next_f64(),
        }
    }

    fn index(&mut self, len: usize) -> usize {
        match self.take("Index") {
            Some(Draw::Index(i)) => {
                assert!(i < len, "scripted index {} out of bounds for {}", i, len);
                i
            }
            _ => self.fallback.index(len),
        }
    }

    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        match self.take("Int") {
            Some(Draw::Int(v)) => {
                assert!(
                    (min..=max).contains(&v),
                    "scripted int {} outside [{}, {}]",
                    v,
                    min,
                    max
                );
                v
            }
            _ => self.fallback.range_inclusive(min, max),
        }
    }

    fn step_range(&mut self, min: i64, max: i64, step: i64) -> i64 {
        match self.take("Amount") {
            // Scripted amounts are taken verbatim so scenarios can force
            // values the configured range would never produce.
            Some(Draw::Amount(v)) => v,
            _ => self.fallback.step_range(min, max, step),
        }
    }
}
