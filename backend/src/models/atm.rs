//! ATM device model
//!
//! An ATM holds a cash reserve and can be taken out of service. A dispense
//! that the reserve cannot cover disables the device; so does a random
//! hardware failure. Only the maintenance cycle brings a device back.
//!
//! CRITICAL: `cash_reserve` never goes negative

use crate::core::clock::Timestamp;
use crate::models::ledger::{EntryKind, FailureReason, Ledger, LedgerEntry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by ATM operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtmError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("Insufficient reserve on ATM-{id}: required {required}, available {available}")]
    InsufficientReserve {
        id: usize,
        required: i64,
        available: i64,
    },
}

/// An ATM device
///
/// # Example
/// ```
/// use atm_simulator_core::AtmDevice;
///
/// let mut atm = AtmDevice::new(0, 1000);
/// atm.dispense_cash(400, 0, "Customer-0").unwrap();
/// assert_eq!(atm.cash_reserve(), 600);
///
/// // Reserve cannot cover this: device goes out of service
/// assert!(atm.dispense_cash(700, 5, "Customer-1").is_err());
/// assert!(!atm.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmDevice {
    id: usize,
    cash_reserve: i64,
    enabled: bool,
    ledger: Ledger,
}

impl AtmDevice {
    /// Create an enabled device with a starting reserve
    ///
    /// # Panics
    /// Panics if `cash_reserve` is negative
    pub fn new(id: usize, cash_reserve: i64) -> Self {
        assert!(cash_reserve >= 0, "cash reserve must be non-negative");
        Self {
            id,
            cash_reserve,
            enabled: true,
            ledger: Ledger::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Display label, e.g. "ATM-2"
    pub fn label(&self) -> String {
        format!("ATM-{}", self.id)
    }

    pub fn cash_reserve(&self) -> i64 {
        self.cash_reserve
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn can_dispense(&self, amount: i64) -> bool {
        self.cash_reserve >= amount
    }

    /// Hand out cash
    ///
    /// If the reserve cannot cover `amount`, the device is disabled and a
    /// failed dispense is recorded.
    pub fn dispense_cash(&mut self, amount: i64, at: Timestamp, customer: &str) -> Result<(), AtmError> {
        if amount <= 0 {
            return Err(AtmError::NonPositiveAmount(amount));
        }

        if !self.can_dispense(amount) {
            self.enabled = false;
            self.ledger.append(LedgerEntry::failed(
                EntryKind::Dispense,
                amount,
                at,
                Some(customer.to_string()),
                FailureReason::DeviceDepleted,
            ));
            return Err(AtmError::InsufficientReserve {
                id: self.id,
                required: amount,
                available: self.cash_reserve,
            });
        }

        self.cash_reserve -= amount;
        self.ledger.append(LedgerEntry::completed(
            EntryKind::Dispense,
            amount,
            at,
            Some(customer.to_string()),
        ));
        Ok(())
    }

    /// Unexpected out-of-service failure during a dispense request
    pub fn fail(&mut self, amount: i64, at: Timestamp, customer: &str) {
        self.enabled = false;
        self.ledger.append(LedgerEntry::failed(
            EntryKind::Dispense,
            amount,
            at,
            Some(customer.to_string()),
            FailureReason::DeviceFailure,
        ));
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }
}
