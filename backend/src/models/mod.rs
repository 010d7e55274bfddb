//! Domain models for the ATM simulator

pub mod atm;
pub mod customer;
pub mod event;
pub mod ledger;
pub mod state;

// Re-exports
pub use atm::{AtmDevice, AtmError};
pub use customer::{Customer, CustomerError};
pub use event::{DeviceDownCause, Event, EventLog};
pub use ledger::{EntryKind, FailureReason, Ledger, LedgerEntry, Outcome};
pub use state::SimulationState;
