//! ATM Simulator Core
//!
//! Closed-world simulation of customers withdrawing from and depositing to
//! a pool of ATM devices, with random device failures, cash depletion and
//! scheduled maintenance.
//!
//! # Architecture
//!
//! - **core**: Simulated clock
//! - **models**: Domain types (Customer, AtmDevice, Ledger, Event, State)
//! - **orchestrator**: Round loop, configuration, statistics
//! - **rng**: Deterministic, injectable random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 and never negative on any agent
//! 2. All randomness goes through a `RandomSource` (seeded by default)
//! 3. Every failed operation leaves a ledger entry; failures are data, not errors

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use crate::core::clock::{SimClock, Timestamp};
pub use models::{
    atm::{AtmDevice, AtmError},
    customer::{Customer, CustomerError},
    event::{DeviceDownCause, Event, EventLog},
    ledger::{EntryKind, FailureReason, Ledger, LedgerEntry, Outcome},
    state::SimulationState,
};
pub use orchestrator::{
    Action, AmountRange, ConfigError, EventSink, NullSink, Orchestrator, Pacing, Pause,
    PolicyConstants, RoundResult, RunStatistics, RunStatus, SimulationConfig, SimulationError,
    SimulationReport, TerminationReason,
};
pub use rng::{RandomSource, RngManager};
