//! Event logging for simulation replay and reporting.
//!
//! This module defines the Event enum which captures every observable step
//! of a run. Events enable:
//! - Streaming display (a reporter renders them as they happen)
//! - Deterministic replay checks (same seed → same event log)
//! - Auditing (verify that no disabled device was ever used)
//!
//! # Example
//!
//! ```rust
//! use atm_simulator_core::models::Event;
//!
//! let event = Event::WithdrawAttempt {
//!     round: 1,
//!     timestamp_ms: 0,
//!     customer: "Customer-0".to_string(),
//!     atm_id: 2,
//!     amount: 1500,
//! };
//!
//! assert_eq!(event.round(), 1);
//! assert_eq!(event.event_type(), "withdraw_attempt");
//! ```

use crate::core::clock::{format_timestamp, Timestamp};
use crate::models::ledger::FailureReason;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a device went out of service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceDownCause {
    /// Reserve could not cover a withdrawal
    Depleted,
    /// Injected hardware failure
    RandomFailure,
    /// Scheduled maintenance, followed by `DeviceUp`
    Maintenance,
}

/// Simulation event capturing a state change.
///
/// All events carry the round they happened in and a simulated timestamp.
/// Events are logged in the order they occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Customer walked up to a device to withdraw
    WithdrawAttempt {
        round: usize,
        timestamp_ms: Timestamp,
        customer: String,
        atm_id: usize,
        amount: i64,
    },

    /// Customer debited and device dispensed
    WithdrawSuccess {
        round: usize,
        timestamp_ms: Timestamp,
        customer: String,
        atm_id: usize,
        amount: i64,
        latency_ms: u64,
    },

    /// Withdrawal refused
    WithdrawFail {
        round: usize,
        timestamp_ms: Timestamp,
        customer: String,
        atm_id: usize,
        amount: i64,
        reason: FailureReason,
    },

    /// Customer deposited funds
    Deposit {
        round: usize,
        timestamp_ms: Timestamp,
        customer: String,
        amount: i64,
    },

    DeviceDown {
        round: usize,
        timestamp_ms: Timestamp,
        atm_id: usize,
        cause: DeviceDownCause,
    },

    DeviceUp {
        round: usize,
        timestamp_ms: Timestamp,
        atm_id: usize,
    },

    /// No enabled device remains; the run ends
    AllDevicesDown {
        round: usize,
        timestamp_ms: Timestamp,
    },
}

impl Event {
    /// Round in which this event occurred
    pub fn round(&self) -> usize {
        match self {
            Event::WithdrawAttempt { round, .. } => *round,
            Event::WithdrawSuccess { round, .. } => *round,
            Event::WithdrawFail { round, .. } => *round,
            Event::Deposit { round, .. } => *round,
            Event::DeviceDown { round, .. } => *round,
            Event::DeviceUp { round, .. } => *round,
            Event::AllDevicesDown { round, .. } => *round,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Event::WithdrawAttempt { timestamp_ms, .. } => *timestamp_ms,
            Event::WithdrawSuccess { timestamp_ms, .. } => *timestamp_ms,
            Event::WithdrawFail { timestamp_ms, .. } => *timestamp_ms,
            Event::Deposit { timestamp_ms, .. } => *timestamp_ms,
            Event::DeviceDown { timestamp_ms, .. } => *timestamp_ms,
            Event::DeviceUp { timestamp_ms, .. } => *timestamp_ms,
            Event::AllDevicesDown { timestamp_ms, .. } => *timestamp_ms,
        }
    }

    /// Short snake_case name matching the serialized `kind` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::WithdrawAttempt { .. } => "withdraw_attempt",
            Event::WithdrawSuccess { .. } => "withdraw_success",
            Event::WithdrawFail { .. } => "withdraw_fail",
            Event::Deposit { .. } => "deposit",
            Event::DeviceDown { .. } => "device_down",
            Event::DeviceUp { .. } => "device_up",
            Event::AllDevicesDown { .. } => "all_devices_down",
        }
    }

    /// Customer involved, if any
    pub fn customer(&self) -> Option<&str> {
        match self {
            Event::WithdrawAttempt { customer, .. } => Some(customer),
            Event::WithdrawSuccess { customer, .. } => Some(customer),
            Event::WithdrawFail { customer, .. } => Some(customer),
            Event::Deposit { customer, .. } => Some(customer),
            _ => None,
        }
    }

    /// Device involved, if any
    pub fn atm_id(&self) -> Option<usize> {
        match self {
            Event::WithdrawAttempt { atm_id, .. } => Some(*atm_id),
            Event::WithdrawSuccess { atm_id, .. } => Some(*atm_id),
            Event::WithdrawFail { atm_id, .. } => Some(*atm_id),
            Event::DeviceDown { atm_id, .. } => Some(*atm_id),
            Event::DeviceUp { atm_id, .. } => Some(*atm_id),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<i64> {
        match self {
            Event::WithdrawAttempt { amount, .. } => Some(*amount),
            Event::WithdrawSuccess { amount, .. } => Some(*amount),
            Event::WithdrawFail { amount, .. } => Some(*amount),
            Event::Deposit { amount, .. } => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", format_timestamp(self.timestamp()))?;
        match self {
            Event::WithdrawAttempt { customer, atm_id, amount, .. } => {
                write!(f, "{} approaches ATM-{} to withdraw ${}", customer, atm_id, amount)
            }
            Event::WithdrawSuccess { customer, amount, latency_ms, .. } => write!(
                f,
                "Transaction successful! {} withdrew ${} in {:.2} seconds",
                customer,
                amount,
                *latency_ms as f64 / 1000.0
            ),
            Event::WithdrawFail { customer, atm_id, amount, reason, .. } => match reason {
                FailureReason::InsufficientBalance => write!(
                    f,
                    "Insufficient balance for {} to withdraw ${}",
                    customer, amount
                ),
                FailureReason::DeviceDepleted => write!(
                    f,
                    "ATM-{} is out of cash. {}'s transaction failed.",
                    atm_id, customer
                ),
                FailureReason::DeviceFailure => write!(
                    f,
                    "ATM-{} failed while serving {}. Transaction aborted.",
                    atm_id, customer
                ),
            },
            Event::Deposit { customer, amount, .. } => {
                write!(f, "{} deposited ${}", customer, amount)
            }
            Event::DeviceDown { atm_id, cause, .. } => match cause {
                DeviceDownCause::Depleted => write!(f, "ATM-{} is out of service (depleted)", atm_id),
                DeviceDownCause::RandomFailure => {
                    write!(f, "ATM-{} went out of service unexpectedly.", atm_id)
                }
                DeviceDownCause::Maintenance => {
                    write!(f, "ATM-{} is undergoing maintenance.", atm_id)
                }
            },
            Event::DeviceUp { atm_id, .. } => write!(f, "ATM-{} is back online.", atm_id),
            Event::AllDevicesDown { .. } => {
                write!(f, "All ATMs are out of cash or disabled. Simulation ends.")
            }
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific round
    pub fn events_in_round(&self, round: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.round() == round).collect()
    }

    /// Get events of a specific type (see [`Event::event_type`])
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_customer(&self, name: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.customer() == Some(name))
            .collect()
    }

    pub fn events_for_atm(&self, atm_id: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.atm_id() == Some(atm_id))
            .collect()
    }
}
