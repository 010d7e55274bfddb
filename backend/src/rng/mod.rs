//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//!
//! The orchestrator only sees the [`RandomSource`] trait, so tests can swap the
//! seeded generator for a [`ScriptedRng`] and pin every draw of a scenario.

mod scripted;
mod source;
mod xorshift;

pub use scripted::{Draw, ScriptedRng};
pub use source::RandomSource;
pub use xorshift::RngManager;
