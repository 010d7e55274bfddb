//! Append-only transaction ledger shared by customers and ATM devices.
//!
//! Every attempted operation leaves exactly one entry, whether it completed
//! or failed. Entries are never edited or removed once written.

use crate::core::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What kind of operation an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Customer debit
    Withdrawal,
    /// Customer credit
    Deposit,
    /// Cash leaving an ATM device
    Dispense,
}

/// Why an operation failed
///
/// These are expected outcomes of the simulation, not faults. Each one is
/// recorded in a ledger and counted in the run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("device depleted")]
    DeviceDepleted,

    #[error("device failure")]
    DeviceFailure,
}

/// Result of a recorded operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    Failed { reason: FailureReason },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Outcome::Completed => None,
            Outcome::Failed { reason } => Some(*reason),
        }
    }
}

/// One ledger line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: i64,
    pub timestamp_ms: Timestamp,
    /// The other party: ATM label on customer entries, customer name on
    /// device entries. `None` for deposits.
    pub counterparty: Option<String>,
    pub outcome: Outcome,
}

impl LedgerEntry {
    pub fn completed(
        kind: EntryKind,
        amount: i64,
        timestamp_ms: Timestamp,
        counterparty: Option<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            timestamp_ms,
            counterparty,
            outcome: Outcome::Completed,
        }
    }

    pub fn failed(
        kind: EntryKind,
        amount: i64,
        timestamp_ms: Timestamp,
        counterparty: Option<String>,
        reason: FailureReason,
    ) -> Self {
        Self {
            kind,
            amount,
            timestamp_ms,
            counterparty,
            outcome: Outcome::Failed { reason },
        }
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = crate::core::clock::format_timestamp(self.timestamp_ms);
        let (sign, done, attempted) = match self.kind {
            EntryKind::Withdrawal => ("-", "Withdrawn", "Withdraw"),
            EntryKind::Deposit => ("+", "Deposited", "Deposit"),
            EntryKind::Dispense => ("-", "Dispensed", "Dispense"),
        };
        match self.outcome {
            Outcome::Completed => write!(f, "{} {} ${} {}", sign, done, self.amount, ts),
            Outcome::Failed { reason } => write!(
                f,
                "{} Failed {} ${} ({}) {}",
                sign, attempted, self.amount, reason, ts
            ),
        }
    }
}

/// Append-only sequence of ledger entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }

    /// Entries of a kind that completed
    pub fn completed(&self, kind: EntryKind) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(move |e| e.kind == kind && e.outcome.is_completed())
    }

    /// Entries that failed, of any kind
    pub fn failures(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| !e.outcome.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_completed_withdrawal() {
        let entry = LedgerEntry::completed(EntryKind::Withdrawal, 1500, 2_500, Some("ATM-1".into()));
        assert_eq!(entry.to_string(), "- Withdrawn $1500 [t+2.500s]");
    }

    #[test]
    fn test_display_failed_entry_names_reason() {
        let entry = LedgerEntry::failed(
            EntryKind::Withdrawal,
            3000,
            0,
            Some("ATM-0".into()),
            FailureReason::InsufficientBalance,
        );
        assert_eq!(
            entry.to_string(),
            "- Failed Withdraw $3000 (insufficient balance) [t+0.000s]"
        );
    }

    #[test]
    fn test_filters_split_completed_and_failed() {
        let mut ledger = Ledger::new();
        ledger.append(LedgerEntry::completed(EntryKind::Deposit, 100, 0, None));
        ledger.append(LedgerEntry::completed(EntryKind::Withdrawal, 200, 1, None));
        ledger.append(LedgerEntry::failed(
            EntryKind::Withdrawal,
            900,
            2,
            None,
            FailureReason::DeviceFailure,
        ));

        assert_eq!(ledger.completed(EntryKind::Withdrawal).count(), 1);
        assert_eq!(ledger.completed(EntryKind::Deposit).count(), 1);
        assert_eq!(ledger.failures().count(), 1);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_string(&Outcome::Failed {
            reason: FailureReason::DeviceDepleted,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"failed","reason":"device_depleted"}"#);
    }
}
