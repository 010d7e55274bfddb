//! Orchestrator Engine
//!
//! Round-based state machine driving customers and ATM devices.
//!
//! # Architecture
//!
//! ```text
//! For each round r (1-based):
//!   For each customer, in roster order:
//!     1. Pre-check: no enabled device → AllDevicesDown, terminate
//!     2. Pick an enabled device uniformly at random
//!     3. Pick an action (withdraw / deposit)
//!     4. Withdraw: random failure → insufficient balance → depleted → success
//!     5. Deposit: always succeeds, no device involved
//!     6. Maintenance if r % interval == 0 (selected device down, pause, up)
//!     7. Pacing pause
//!   Terminate if max_rounds reached or every device is down
//! ```
//!
//! Steps 6 and 7 are skipped for an actor-round that ended in a random
//! device failure.
//!
//! # Example
//!
//! ```rust
//! use atm_simulator_core::{Orchestrator, SimulationConfig, TerminationReason};
//!
//! let config = SimulationConfig {
//!     num_customers: 5,
//!     num_atms: 2,
//!     max_rounds: Some(10),
//!     rng_seed: 12345,
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! let report = orchestrator.run().unwrap();
//!
//! assert!(report.rounds_completed <= 10);
//! assert!(report.termination.is_some());
//! ```

use crate::core::clock::SimClock;
use crate::models::atm::{AtmDevice, AtmError};
use crate::models::customer::{Customer, CustomerError};
use crate::models::event::{DeviceDownCause, Event, EventLog};
use crate::models::ledger::FailureReason;
use crate::models::state::SimulationState;
use crate::orchestrator::config::{validate_counts, ConfigError, SimulationConfig, AMOUNT_STEP};
use crate::orchestrator::stats::RunStatistics;
use crate::rng::{RandomSource, RngManager};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ============================================================================
// Public Types
// ============================================================================

/// What a customer does in an actor-round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Withdraw,
    Deposit,
}

impl Action {
    /// Uniform choice between the two actions
    pub fn choose(rng: &mut dyn RandomSource) -> Self {
        match rng.index(2) {
            0 => Action::Withdraw,
            _ => Action::Deposit,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// No device was left in service
    AllDevicesDown,
    /// `max_rounds` rounds were completed
    RoundLimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Terminated(TerminationReason),
}

/// A simulated pause offered to the event sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Gap after a customer's action
    ActorRound,
    /// Device held offline for maintenance
    Maintenance { atm_id: usize },
}

/// Receiver of events as the run progresses
///
/// The engine never formats output or sleeps. A reporter implements this
/// trait to render events and may block in `on_pause` to animate the run.
pub trait EventSink {
    fn on_event(&mut self, event: &Event);

    /// Called before the simulated clock advances by `duration_ms`
    fn on_pause(&mut self, _pause: Pause, _duration_ms: u64) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &Event) {}
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Simulation already terminated")]
    AlreadyTerminated,

    /// A debit, credit or dispense failed after its pre-checks passed
    #[error("Ledger mismatch for {customer}: {detail}")]
    LedgerMismatch {
        customer: String,
        atm_id: Option<usize>,
        detail: String,
    },
}

/// Result of a single round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// Round number (1-based)
    pub round: usize,

    /// Customers that acted before the round ended
    pub actor_rounds: usize,

    pub successful_withdrawals: u64,

    pub failed_withdrawals: u64,

    pub deposits: u64,

    pub maintenance_events: u64,

    /// Status after the round
    pub status: RunStatus,
}

/// Final (or intermediate) snapshot of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,

    /// SHA256 of the config, plus the roster for explicit runs
    pub config_fingerprint: String,

    pub rng_seed: u64,

    /// Rounds between maintenance cycles, drawn at construction
    pub maintenance_interval: usize,

    pub rounds_completed: usize,

    /// `None` while the run is still going
    pub termination: Option<TerminationReason>,

    /// Simulated time at the moment of the snapshot
    pub elapsed_ms: u64,

    pub statistics: RunStatistics,

    /// Customers with their final balances and ledgers, in roster order
    pub customers: Vec<Customer>,

    /// Devices with their final reserves and ledgers, in roster order
    pub atms: Vec<AtmDevice>,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning one run
///
/// All randomness goes through the injected [`RandomSource`]. With the
/// default [`RngManager`], same seed + same config = identical runs.
pub struct Orchestrator {
    config: SimulationConfig,

    state: SimulationState,

    clock: SimClock,

    rng: Box<dyn RandomSource>,

    /// Maintenance happens in rounds divisible by this
    maintenance_interval: usize,

    statistics: RunStatistics,

    event_log: EventLog,

    status: RunStatus,

    run_id: Uuid,

    config_fingerprint: String,
}

/// How a withdrawal attempt ended, as far as the rest of the actor-round is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WithdrawFlow {
    Continue,
    /// Random device failure: skip maintenance and pacing
    Aborted,
}

impl Orchestrator {
    /// Create an orchestrator with a generated roster and a seeded RNG
    ///
    /// Customers are named `Customer-{i}` and devices numbered from 0.
    /// Opening balances and reserves are drawn from the policy ranges.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if validation fails.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = Box::new(RngManager::new(config.rng_seed));
        Self::with_rng(config, rng)
    }

    /// Like [`Orchestrator::new`], drawing from the given random source
    pub fn with_rng(
        config: SimulationConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let policy = &config.policy;
        let customers: Vec<Customer> = (0..config.num_customers)
            .map(|i| {
                let balance = rng.step_range(
                    policy.initial_balance.min,
                    policy.initial_balance.max,
                    AMOUNT_STEP,
                );
                Customer::new(format!("Customer-{}", i), balance)
            })
            .collect();

        let atms: Vec<AtmDevice> = (0..config.num_atms)
            .map(|id| {
                let reserve = rng.step_range(
                    policy.initial_reserve.min,
                    policy.initial_reserve.max,
                    AMOUNT_STEP,
                );
                AtmDevice::new(id, reserve)
            })
            .collect();

        let config_fingerprint = config.fingerprint()?;
        Self::build(config, customers, atms, rng, config_fingerprint)
    }

    /// Create an orchestrator over an explicit roster
    ///
    /// `num_customers` and `num_atms` in the config are ignored; the roster
    /// sizes are validated against the same bounds instead. Opening balances
    /// and reserves must be non-negative, and the report fingerprint covers
    /// the roster as well as the config.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atm_simulator_core::rng::{Draw, ScriptedRng};
    /// use atm_simulator_core::{AtmDevice, Customer, Orchestrator, SimulationConfig};
    ///
    /// let config = SimulationConfig { max_rounds: Some(1), ..Default::default() };
    /// let rng = ScriptedRng::new(vec![
    ///     Draw::Int(5),       // maintenance interval
    ///     Draw::Index(0),     // device
    ///     Draw::Index(1),     // action: deposit
    ///     Draw::Amount(300),  // deposit amount
    /// ]);
    ///
    /// let mut orchestrator = Orchestrator::with_roster(
    ///     config,
    ///     vec![Customer::new("Alice", 500)],
    ///     vec![AtmDevice::new(0, 1000)],
    ///     Box::new(rng),
    /// )
    /// .unwrap();
    ///
    /// let report = orchestrator.run().unwrap();
    /// assert_eq!(report.customers[0].balance(), 800);
    /// ```
    pub fn with_roster(
        config: SimulationConfig,
        customers: Vec<Customer>,
        atms: Vec<AtmDevice>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, SimulationError> {
        config.validate_run_parameters()?;
        validate_counts(customers.len(), atms.len())?;

        let mut names = HashSet::new();
        for customer in &customers {
            if !names.insert(customer.name()) {
                return Err(ConfigError::DuplicateCustomer(customer.name().to_string()).into());
            }
            if customer.balance() < 0 {
                return Err(ConfigError::NegativeOpeningAmount {
                    owner: customer.name().to_string(),
                    amount: customer.balance(),
                }
                .into());
            }
        }

        let mut ids = HashSet::new();
        for atm in &atms {
            if !ids.insert(atm.id()) {
                return Err(ConfigError::DuplicateAtm(atm.id()).into());
            }
            if atm.cash_reserve() < 0 {
                return Err(ConfigError::NegativeOpeningAmount {
                    owner: atm.label(),
                    amount: atm.cash_reserve(),
                }
                .into());
            }
        }

        let config_fingerprint = config.roster_fingerprint(&customers, &atms)?;
        Self::build(config, customers, atms, rng, config_fingerprint)
    }

    fn build(
        config: SimulationConfig,
        customers: Vec<Customer>,
        atms: Vec<AtmDevice>,
        mut rng: Box<dyn RandomSource>,
        config_fingerprint: String,
    ) -> Result<Self, SimulationError> {
        let maintenance_interval = rng.range_inclusive(
            config.policy.maintenance_interval_min as i64,
            config.policy.maintenance_interval_max as i64,
        ) as usize;
        let run_id = Uuid::new_v4();

        info!(
            %run_id,
            customers = customers.len(),
            atms = atms.len(),
            max_rounds = ?config.max_rounds,
            maintenance_interval,
            "simulation initialized"
        );

        Ok(Self {
            config,
            state: SimulationState::new(customers, atms),
            clock: SimClock::new(),
            rng,
            maintenance_interval,
            statistics: RunStatistics::new(),
            event_log: EventLog::new(),
            status: RunStatus::Running,
            run_id,
            config_fingerprint,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Rounds started so far
    pub fn current_round(&self) -> usize {
        self.clock.current_round()
    }

    pub fn maintenance_interval(&self) -> usize {
        self.maintenance_interval
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    // ========================================================================
    // Run Loop
    // ========================================================================

    /// Run to termination, discarding streamed events
    ///
    /// Events are still recorded in the event log.
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        self.run_with(&mut NullSink)
    }

    /// Run to termination, streaming events to `sink`
    pub fn run_with(&mut self, sink: &mut dyn EventSink) -> Result<SimulationReport, SimulationError> {
        while self.is_running() {
            self.run_round_with(sink)?;
        }
        Ok(self.report())
    }

    /// Execute one round without a sink
    pub fn run_round(&mut self) -> Result<RoundResult, SimulationError> {
        self.run_round_with(&mut NullSink)
    }

    /// Execute one round: every customer acts once, in roster order
    ///
    /// # Errors
    ///
    /// `SimulationError::AlreadyTerminated` if the run has ended.
    pub fn run_round_with(&mut self, sink: &mut dyn EventSink) -> Result<RoundResult, SimulationError> {
        if !self.is_running() {
            return Err(SimulationError::AlreadyTerminated);
        }

        let round = self.clock.begin_round();
        let before = self.statistics.clone();
        let mut actor_rounds = 0;

        for customer_idx in 0..self.state.num_customers() {
            if !self.state.any_atm_enabled() {
                self.terminate_all_devices_down(round, sink);
                break;
            }
            self.step_customer(round, customer_idx, sink)?;
            actor_rounds += 1;
        }

        if self.is_running() {
            if !self.state.any_atm_enabled() {
                self.terminate_all_devices_down(round, sink);
            } else if self.config.max_rounds.is_some_and(|max| round >= max) {
                self.terminate(TerminationReason::RoundLimitReached);
            }
        }

        Ok(RoundResult {
            round,
            actor_rounds,
            successful_withdrawals: self.statistics.successful_transactions
                - before.successful_transactions,
            failed_withdrawals: self.statistics.failed_transactions - before.failed_transactions,
            deposits: self.statistics.deposits - before.deposits,
            maintenance_events: self.statistics.maintenance_events - before.maintenance_events,
            status: self.status,
        })
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> SimulationReport {
        let termination = match self.status {
            RunStatus::Running => None,
            RunStatus::Terminated(reason) => Some(reason),
        };

        SimulationReport {
            run_id: self.run_id,
            config_fingerprint: self.config_fingerprint.clone(),
            rng_seed: self.config.rng_seed,
            maintenance_interval: self.maintenance_interval,
            rounds_completed: self.clock.current_round(),
            termination,
            elapsed_ms: self.clock.now(),
            statistics: self.statistics.clone(),
            customers: self.state.customers().to_vec(),
            atms: self.state.atms().to_vec(),
        }
    }

    // ========================================================================
    // Actor-Round
    // ========================================================================

    fn step_customer(
        &mut self,
        round: usize,
        customer_idx: usize,
        sink: &mut dyn EventSink,
    ) -> Result<(), SimulationError> {
        let enabled = self.state.enabled_atm_indices();
        let atm_idx = enabled[self.rng.index(enabled.len())];
        let action = Action::choose(self.rng.as_mut());

        debug!(
            round,
            customer = self.state.customers()[customer_idx].name(),
            atm_id = self.state.atms()[atm_idx].id(),
            ?action,
            "actor selected"
        );

        match action {
            Action::Withdraw => {
                if self.withdraw(round, customer_idx, atm_idx, sink)? == WithdrawFlow::Aborted {
                    return Ok(());
                }
            }
            Action::Deposit => self.deposit(round, customer_idx, sink)?,
        }

        if round % self.maintenance_interval == 0 {
            self.run_maintenance(round, atm_idx, sink);
        }

        self.pause(Pause::ActorRound, self.config.pacing.actor_round_ms, sink);
        Ok(())
    }

    fn withdraw(
        &mut self,
        round: usize,
        customer_idx: usize,
        atm_idx: usize,
        sink: &mut dyn EventSink,
    ) -> Result<WithdrawFlow, SimulationError> {
        let range = self.config.policy.withdrawal_amount;
        let amount = self.rng.step_range(range.min, range.max, AMOUNT_STEP);
        let now = self.clock.now();
        let name = self.state.customers()[customer_idx].name().to_string();
        let atm_id = self.state.atms()[atm_idx].id();
        let atm_label = self.state.atms()[atm_idx].label();

        self.emit(
            Event::WithdrawAttempt {
                round,
                timestamp_ms: now,
                customer: name.clone(),
                atm_id,
                amount,
            },
            sink,
        );
        self.statistics.record_attempt();

        let mismatch = |detail: String| SimulationError::LedgerMismatch {
            customer: name.clone(),
            atm_id: Some(atm_id),
            detail,
        };

        if self.rng.next_f64() < self.config.policy.failure_probability {
            let (customer, atm) = self.state.pair_mut(customer_idx, atm_idx);
            atm.fail(amount, now, &name);
            customer.reject_withdrawal(amount, FailureReason::DeviceFailure, now, &atm_label);

            info!(round, atm_id, customer = %name, "device went out of service unexpectedly");
            self.device_down(round, atm_id, DeviceDownCause::RandomFailure, sink);
            self.fail_withdrawal(round, &name, atm_id, amount, FailureReason::DeviceFailure, sink);
            return Ok(WithdrawFlow::Aborted);
        }

        let (customer, atm) = self.state.pair_mut(customer_idx, atm_idx);

        if !customer.can_afford(amount) {
            // The customer records its own failed entry here
            match customer.withdraw(amount, now, &atm_label) {
                Err(CustomerError::InsufficientBalance { .. }) => {}
                Ok(()) => return Err(mismatch("debit succeeded without funds".to_string())),
                Err(e) => return Err(mismatch(e.to_string())),
            }
            debug!(round, customer = %name, amount, "insufficient balance");
            self.fail_withdrawal(round, &name, atm_id, amount, FailureReason::InsufficientBalance, sink);
            return Ok(WithdrawFlow::Continue);
        }

        if !atm.can_dispense(amount) {
            match atm.dispense_cash(amount, now, &name) {
                Err(AtmError::InsufficientReserve { .. }) => {}
                Ok(()) => return Err(mismatch("dispense succeeded without reserve".to_string())),
                Err(e) => return Err(mismatch(e.to_string())),
            }
            customer.reject_withdrawal(amount, FailureReason::DeviceDepleted, now, &atm_label);

            info!(round, atm_id, customer = %name, amount, "device depleted");
            self.device_down(round, atm_id, DeviceDownCause::Depleted, sink);
            self.fail_withdrawal(round, &name, atm_id, amount, FailureReason::DeviceDepleted, sink);
            return Ok(WithdrawFlow::Continue);
        }

        // Both sides were checked above, so neither call can fail
        customer
            .withdraw(amount, now, &atm_label)
            .map_err(|e| mismatch(e.to_string()))?;
        atm.dispense_cash(amount, now, &name)
            .map_err(|e| mismatch(e.to_string()))?;

        let latency_ms = self.config.pacing.transaction_latency_ms;
        self.clock.advance(latency_ms);
        self.statistics.record_success(amount, latency_ms);

        debug!(round, customer = %name, atm_id, amount, "withdrawal completed");
        self.emit(
            Event::WithdrawSuccess {
                round,
                timestamp_ms: self.clock.now(),
                customer: name,
                atm_id,
                amount,
                latency_ms,
            },
            sink,
        );
        Ok(WithdrawFlow::Continue)
    }

    fn deposit(
        &mut self,
        round: usize,
        customer_idx: usize,
        sink: &mut dyn EventSink,
    ) -> Result<(), SimulationError> {
        let range = self.config.policy.deposit_amount;
        let amount = self.rng.step_range(range.min, range.max, AMOUNT_STEP);
        let now = self.clock.now();

        let customer = self.state.customer_at_mut(customer_idx);
        let name = customer.name().to_string();
        customer
            .deposit(amount, now)
            .map_err(|e| SimulationError::LedgerMismatch {
                customer: name.clone(),
                atm_id: None,
                detail: e.to_string(),
            })?;

        self.statistics.record_deposit(amount);
        self.emit(
            Event::Deposit {
                round,
                timestamp_ms: now,
                customer: name,
                amount,
            },
            sink,
        );
        Ok(())
    }

    /// Take the selected device offline, hold it for the maintenance pause,
    /// then bring it back. This also revives a depleted device.
    fn run_maintenance(&mut self, round: usize, atm_idx: usize, sink: &mut dyn EventSink) {
        let atm = self.state.atm_at_mut(atm_idx);
        atm.disable();
        let atm_id = atm.id();

        info!(round, atm_id, "maintenance started");
        self.device_down(round, atm_id, DeviceDownCause::Maintenance, sink);
        self.pause(
            Pause::Maintenance { atm_id },
            self.config.pacing.maintenance_pause_ms,
            sink,
        );

        self.state.atm_at_mut(atm_idx).enable();
        self.statistics.record_maintenance();
        self.emit(
            Event::DeviceUp {
                round,
                timestamp_ms: self.clock.now(),
                atm_id,
            },
            sink,
        );
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn emit(&mut self, event: Event, sink: &mut dyn EventSink) {
        sink.on_event(&event);
        self.event_log.log(event);
    }

    fn pause(&mut self, pause: Pause, duration_ms: u64, sink: &mut dyn EventSink) {
        sink.on_pause(pause, duration_ms);
        self.clock.advance(duration_ms);
    }

    fn device_down(&mut self, round: usize, atm_id: usize, cause: DeviceDownCause, sink: &mut dyn EventSink) {
        self.emit(
            Event::DeviceDown {
                round,
                timestamp_ms: self.clock.now(),
                atm_id,
                cause,
            },
            sink,
        );
    }

    fn fail_withdrawal(
        &mut self,
        round: usize,
        customer: &str,
        atm_id: usize,
        amount: i64,
        reason: FailureReason,
        sink: &mut dyn EventSink,
    ) {
        self.statistics.record_failure(reason);
        self.emit(
            Event::WithdrawFail {
                round,
                timestamp_ms: self.clock.now(),
                customer: customer.to_string(),
                atm_id,
                amount,
                reason,
            },
            sink,
        );
    }

    fn terminate_all_devices_down(&mut self, round: usize, sink: &mut dyn EventSink) {
        warn!(round, "all ATMs are out of cash or disabled");
        self.emit(
            Event::AllDevicesDown {
                round,
                timestamp_ms: self.clock.now(),
            },
            sink,
        );
        self.terminate(TerminationReason::AllDevicesDown);
    }

    fn terminate(&mut self, reason: TerminationReason) {
        info!(
            rounds = self.clock.current_round(),
            ?reason,
            successful = self.statistics.successful_transactions,
            failed = self.statistics.failed_transactions,
            "simulation terminated"
        );
        self.status = RunStatus::Terminated(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Draw, ScriptedRng};

    fn single_pair(balance: i64, reserve: i64, draws: Vec<Draw>) -> Orchestrator {
        let config = SimulationConfig {
            max_rounds: Some(1),
            ..Default::default()
        };
        Orchestrator::with_roster(
            config,
            vec![Customer::new("Customer-0", balance)],
            vec![AtmDevice::new(0, reserve)],
            Box::new(ScriptedRng::new(draws)),
        )
        .unwrap()
    }

    #[test]
    fn test_action_choice_maps_indices() {
        let mut rng = ScriptedRng::new(vec![Draw::Index(0), Draw::Index(1)]);
        assert_eq!(Action::choose(&mut rng), Action::Withdraw);
        assert_eq!(Action::choose(&mut rng), Action::Deposit);
    }

    #[test]
    fn test_round_after_termination_is_rejected() {
        let mut orchestrator = single_pair(
            1000,
            1000,
            vec![Draw::Int(5), Draw::Index(0), Draw::Index(1), Draw::Amount(100)],
        );

        orchestrator.run_round().unwrap();
        assert_eq!(
            orchestrator.status(),
            RunStatus::Terminated(TerminationReason::RoundLimitReached)
        );
        assert_eq!(orchestrator.run_round(), Err(SimulationError::AlreadyTerminated));
    }

    #[test]
    fn test_success_advances_clock_by_latency_and_pacing() {
        let mut orchestrator = single_pair(
            5000,
            5000,
            vec![
                Draw::Int(5),
                Draw::Index(0),
                Draw::Index(0),
                Draw::Amount(1000),
                Draw::Unit(0.99),
            ],
        );

        let result = orchestrator.run_round().unwrap();
        let pacing = orchestrator.config().pacing;

        assert_eq!(result.successful_withdrawals, 1);
        assert_eq!(
            orchestrator.elapsed_ms(),
            pacing.transaction_latency_ms + pacing.actor_round_ms
        );
    }

    #[test]
    fn test_maintenance_fires_on_interval_rounds() {
        let mut orchestrator = single_pair(
            1000,
            1000,
            vec![Draw::Int(1), Draw::Index(0), Draw::Index(1), Draw::Amount(200)],
        );

        let result = orchestrator.run_round().unwrap();

        assert_eq!(result.maintenance_events, 1);
        assert!(orchestrator.state().atms()[0].is_enabled());
        let kinds: Vec<&str> = orchestrator
            .event_log()
            .events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(kinds, vec!["deposit", "device_down", "device_up"]);
    }

    #[test]
    fn test_duplicate_roster_entries_rejected() {
        let config = SimulationConfig::default();
        let err = Orchestrator::with_roster(
            config.clone(),
            vec![Customer::new("Same", 0), Customer::new("Same", 0)],
            vec![AtmDevice::new(0, 0)],
            Box::new(RngManager::new(1)),
        )
        .err();
        assert_eq!(
            err,
            Some(SimulationError::InvalidConfig(ConfigError::DuplicateCustomer(
                "Same".to_string()
            )))
        );

        let err = Orchestrator::with_roster(
            config,
            vec![Customer::new("A", 0)],
            vec![AtmDevice::new(3, 0), AtmDevice::new(3, 0)],
            Box::new(RngManager::new(1)),
        )
        .err();
        assert_eq!(
            err,
            Some(SimulationError::InvalidConfig(ConfigError::DuplicateAtm(3)))
        );
    }
}
