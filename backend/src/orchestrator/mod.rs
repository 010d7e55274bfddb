//! Orchestrator - round loop, configuration and run statistics
//!
//! See `engine.rs` for the state machine.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{AmountRange, ConfigError, Pacing, PolicyConstants, SimulationConfig};
pub use engine::{
    Action, EventSink, NullSink, Orchestrator, Pause, RoundResult, RunStatus, SimulationError,
    SimulationReport, TerminationReason,
};
pub use stats::RunStatistics;
