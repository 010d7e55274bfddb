//! Run-level statistics, accumulated incrementally by the orchestrator.

use crate::models::ledger::FailureReason;
use serde::{Deserialize, Serialize};

/// Aggregate counters for one run
///
/// Invariant: `successful_transactions + failed_transactions == total_attempts`.
/// Deposits never fail and are counted separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub successful_transactions: u64,
    pub failed_transactions: u64,
    /// Withdrawal attempts (successful or not)
    pub total_attempts: u64,
    pub deposits: u64,
    pub deposited_amount: i64,
    pub withdrawn_amount: i64,
    /// Random out-of-service failures
    pub device_failures: u64,
    /// Devices disabled for lack of cash
    pub device_depletions: u64,
    pub insufficient_balance_failures: u64,
    pub maintenance_events: u64,
    /// Simulated latency summed over successful withdrawals
    pub total_latency_ms: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_attempt(&mut self) {
        self.total_attempts += 1;
    }

    pub(crate) fn record_success(&mut self, amount: i64, latency_ms: u64) {
        self.successful_transactions += 1;
        self.withdrawn_amount += amount;
        self.total_latency_ms += latency_ms;
    }

    pub(crate) fn record_failure(&mut self, reason: FailureReason) {
        self.failed_transactions += 1;
        match reason {
            FailureReason::InsufficientBalance => self.insufficient_balance_failures += 1,
            FailureReason::DeviceDepleted => self.device_depletions += 1,
            FailureReason::DeviceFailure => self.device_failures += 1,
        }
    }

    pub(crate) fn record_deposit(&mut self, amount: i64) {
        self.deposits += 1;
        self.deposited_amount += amount;
    }

    pub(crate) fn record_maintenance(&mut self) {
        self.maintenance_events += 1;
    }

    /// Mean latency of successful withdrawals in milliseconds (0 if none)
    pub fn average_latency_ms(&self) -> f64 {
        if self.successful_transactions == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.successful_transactions as f64
        }
    }

    /// Share of withdrawal attempts that succeeded (0 if none)
    pub fn success_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            self.successful_transactions as f64 / self.total_attempts as f64
        }
    }
}
