//! Customer model
//!
//! A bank customer with a single account balance and a personal ledger.
//! The balance never goes negative: a withdrawal that would overdraw the
//! account is refused and recorded as a failed entry instead.
//!
//! CRITICAL: All money values are i64 (whole currency units)

use crate::core::clock::Timestamp;
use crate::models::ledger::{EntryKind, FailureReason, Ledger, LedgerEntry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by customer operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },
}

/// A customer taking part in a run
///
/// # Example
/// ```
/// use atm_simulator_core::Customer;
///
/// let mut customer = Customer::new("Customer-0", 5000);
/// customer.withdraw(1200, 0, "ATM-0").unwrap();
/// customer.deposit(300, 10).unwrap();
///
/// assert_eq!(customer.balance(), 4100);
/// assert_eq!(customer.ledger().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique name within a run (e.g., "Customer-3")
    name: String,

    /// Account balance, never negative
    balance: i64,

    ledger: Ledger,
}

impl Customer {
    /// Create a customer with an opening balance
    ///
    /// # Panics
    /// Panics if `balance` is negative
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        assert!(balance >= 0, "opening balance must be non-negative");
        Self {
            name: name.into(),
            balance,
            ledger: Ledger::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Whether the balance covers `amount`
    pub fn can_afford(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Debit the account
    ///
    /// On insufficient balance the attempt is still written to the ledger as
    /// a failed withdrawal, and the balance is left unchanged.
    ///
    /// # Arguments
    /// * `amount` - Amount to withdraw (must be positive)
    /// * `at` - Simulated timestamp
    /// * `device` - Label of the ATM serving the withdrawal
    pub fn withdraw(&mut self, amount: i64, at: Timestamp, device: &str) -> Result<(), CustomerError> {
        if amount <= 0 {
            return Err(CustomerError::NonPositiveAmount(amount));
        }

        if !self.can_afford(amount) {
            self.ledger.append(LedgerEntry::failed(
                EntryKind::Withdrawal,
                amount,
                at,
                Some(device.to_string()),
                FailureReason::InsufficientBalance,
            ));
            return Err(CustomerError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        self.ledger.append(LedgerEntry::completed(
            EntryKind::Withdrawal,
            amount,
            at,
            Some(device.to_string()),
        ));
        Ok(())
    }

    /// Credit the account. Always succeeds for a positive amount.
    pub fn deposit(&mut self, amount: i64, at: Timestamp) -> Result<(), CustomerError> {
        if amount <= 0 {
            return Err(CustomerError::NonPositiveAmount(amount));
        }

        self.balance += amount;
        self.ledger
            .append(LedgerEntry::completed(EntryKind::Deposit, amount, at, None));
        Ok(())
    }

    /// Record a withdrawal that the device refused
    ///
    /// Used when the customer could pay but the ATM could not serve them
    /// (depleted or out of service). Balance is untouched.
    pub fn reject_withdrawal(&mut self, amount: i64, reason: FailureReason, at: Timestamp, device: &str) {
        self.ledger.append(LedgerEntry::failed(
            EntryKind::Withdrawal,
            amount,
            at,
            Some(device.to_string()),
            reason,
        ));
    }
}
