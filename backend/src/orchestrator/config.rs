//! Run configuration and construction-time validation
//!
//! Every field has a default matching the classic ATM demo (10 customers,
//! 3 devices, 20 rounds), so a partial JSON document is a valid config.

use crate::models::{AtmDevice, Customer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Granularity of every drawn amount
pub const AMOUNT_STEP: i64 = 100;

pub const MIN_CUSTOMERS: usize = 1;
pub const MAX_CUSTOMERS: usize = 50;
pub const MIN_ATMS: usize = 1;
pub const MAX_ATMS: usize = 10;

/// Configuration rejected before a run starts
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("num_customers must be in {min}..={max}, got {got}")]
    CustomerCount { got: usize, min: usize, max: usize },

    #[error("num_atms must be in {min}..={max}, got {got}")]
    AtmCount { got: usize, min: usize, max: usize },

    #[error("max_rounds must be at least 1 when set")]
    ZeroRoundLimit,

    #[error("an unbounded run needs a positive failure_probability to terminate")]
    UnboundedWithoutFailures,

    #[error("{field}: invalid range {min}..={max} (need 0 < min <= max, multiples of {step})")]
    InvalidAmountRange {
        field: &'static str,
        min: i64,
        max: i64,
        step: i64,
    },

    #[error("failure_probability must be in [0, 1), got {0}")]
    FailureProbability(f64),

    #[error("maintenance interval range {min}..={max} is invalid (need 1 <= min <= max)")]
    MaintenanceInterval { min: usize, max: usize },

    #[error("Duplicate customer name: {0}")]
    DuplicateCustomer(String),

    #[error("Duplicate ATM id: {0}")]
    DuplicateAtm(usize),

    #[error("{owner} opens with a negative amount: {amount}")]
    NegativeOpeningAmount { owner: String, amount: i64 },

    #[error("Config serialization failed: {0}")]
    Serialization(String),
}

/// Inclusive range of amounts, drawn in steps of [`AMOUNT_STEP`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: i64,
    pub max: i64,
}

impl AmountRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: i64) -> bool {
        (self.min..=self.max).contains(&amount)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        let aligned = self.min % AMOUNT_STEP == 0 && self.max % AMOUNT_STEP == 0;
        if self.min <= 0 || self.min > self.max || !aligned {
            return Err(ConfigError::InvalidAmountRange {
                field,
                min: self.min,
                max: self.max,
                step: AMOUNT_STEP,
            });
        }
        Ok(())
    }
}

/// Fixed policy constants of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConstants {
    /// Opening customer balances
    pub initial_balance: AmountRange,

    /// Opening device reserves
    pub initial_reserve: AmountRange,

    pub withdrawal_amount: AmountRange,

    pub deposit_amount: AmountRange,

    /// Chance that a device fails outright on a withdrawal request
    pub failure_probability: f64,

    /// Bounds for the maintenance interval, drawn once per run
    pub maintenance_interval_min: usize,
    pub maintenance_interval_max: usize,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            initial_balance: AmountRange::new(2000, 10000),
            initial_reserve: AmountRange::new(5000, 10000),
            withdrawal_amount: AmountRange::new(1000, 5000),
            deposit_amount: AmountRange::new(100, 5000),
            failure_probability: 0.05,
            maintenance_interval_min: 1,
            maintenance_interval_max: 5,
        }
    }
}

impl PolicyConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_balance.validate("initial_balance")?;
        self.initial_reserve.validate("initial_reserve")?;
        self.withdrawal_amount.validate("withdrawal_amount")?;
        self.deposit_amount.validate("deposit_amount")?;

        if !(0.0..1.0).contains(&self.failure_probability) {
            return Err(ConfigError::FailureProbability(self.failure_probability));
        }

        if self.maintenance_interval_min == 0
            || self.maintenance_interval_min > self.maintenance_interval_max
        {
            return Err(ConfigError::MaintenanceInterval {
                min: self.maintenance_interval_min,
                max: self.maintenance_interval_max,
            });
        }

        Ok(())
    }
}

/// Simulated durations, in milliseconds
///
/// These only advance the simulated clock. A reporter may additionally
/// sleep for them through `EventSink::on_pause` to animate a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Gap after each actor-round
    pub actor_round_ms: u64,

    /// How long a device stays offline for maintenance
    pub maintenance_pause_ms: u64,

    /// Time a successful withdrawal takes
    pub transaction_latency_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            actor_round_ms: 500,
            maintenance_pause_ms: 1000,
            transaction_latency_ms: 250,
        }
    }
}

/// Complete run configuration
///
/// # Example
/// ```
/// use atm_simulator_core::SimulationConfig;
///
/// let config: SimulationConfig =
///     serde_json::from_str(r#"{"num_customers": 4, "max_rounds": null}"#).unwrap();
///
/// assert_eq!(config.num_customers, 4);
/// assert_eq!(config.num_atms, 3);
/// assert_eq!(config.max_rounds, None);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_customers: usize,

    pub num_atms: usize,

    /// Round bound; `None` runs until every device is down
    pub max_rounds: Option<usize>,

    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    pub policy: PolicyConstants,

    pub pacing: Pacing,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_customers: 10,
            num_atms: 3,
            max_rounds: Some(20),
            rng_seed: 42,
            policy: PolicyConstants::default(),
            pacing: Pacing::default(),
        }
    }
}

impl SimulationConfig {
    /// Check everything, including roster sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.num_customers, self.num_atms)?;
        self.validate_run_parameters()
    }

    /// Check everything except roster sizes (used with explicit rosters)
    pub fn validate_run_parameters(&self) -> Result<(), ConfigError> {
        if self.max_rounds == Some(0) {
            return Err(ConfigError::ZeroRoundLimit);
        }
        self.policy.validate()?;

        // Maintenance re-enables depleted devices, so only random failures
        // guarantee that an unbounded run ends.
        if self.max_rounds.is_none() && self.policy.failure_probability <= 0.0 {
            return Err(ConfigError::UnboundedWithoutFailures);
        }
        Ok(())
    }

    /// SHA256 of the canonical JSON form of this config
    ///
    /// Two generated runs with equal fingerprints produce identical results.
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        canonical_digest(&to_json(self)?)
    }

    /// SHA256 of this config together with an explicit roster
    ///
    /// The roster takes the place of `num_customers` and `num_atms`, which
    /// explicit runs ignore.
    pub fn roster_fingerprint(
        &self,
        customers: &[Customer],
        atms: &[AtmDevice],
    ) -> Result<String, ConfigError> {
        let mut value = to_json(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("num_customers");
            map.remove("num_atms");
            map.insert("customers".to_string(), to_json(customers)?);
            map.insert("atms".to_string(), to_json(atms)?);
        }
        canonical_digest(&value)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, ConfigError> {
    serde_json::to_value(value).map_err(|e| ConfigError::Serialization(e.to_string()))
}

// Value maps are key-sorted, which gives a canonical encoding
fn canonical_digest(value: &Value) -> Result<String, ConfigError> {
    let json =
        serde_json::to_string(value).map_err(|e| ConfigError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

pub(crate) fn validate_counts(num_customers: usize, num_atms: usize) -> Result<(), ConfigError> {
    if !(MIN_CUSTOMERS..=MAX_CUSTOMERS).contains(&num_customers) {
        return Err(ConfigError::CustomerCount {
            got: num_customers,
            min: MIN_CUSTOMERS,
            max: MAX_CUSTOMERS,
        });
    }
    if !(MIN_ATMS..=MAX_ATMS).contains(&num_atms) {
        return Err(ConfigError::AtmCount {
            got: num_atms,
            min: MIN_ATMS,
            max: MAX_ATMS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_customers_rejected() {
        let config = SimulationConfig {
            num_customers: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CustomerCount {
                got: 0,
                min: 1,
                max: 50
            })
        );
    }

    #[test]
    fn test_too_many_atms_rejected() {
        let config = SimulationConfig {
            num_atms: 11,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AtmCount { got: 11, .. })));
    }

    #[test]
    fn test_zero_round_limit_rejected() {
        let config = SimulationConfig {
            max_rounds: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRoundLimit));
    }

    #[test]
    fn test_unbounded_run_needs_failures() {
        let mut config = SimulationConfig {
            max_rounds: None,
            ..Default::default()
        };
        config.policy.failure_probability = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::UnboundedWithoutFailures));

        config.max_rounds = Some(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unaligned_amount_range_rejected() {
        let mut config = SimulationConfig::default();
        config.policy.withdrawal_amount = AmountRange::new(1050, 5000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAmountRange {
                field: "withdrawal_amount",
                ..
            })
        ));
    }

    #[test]
    fn test_probability_of_one_rejected() {
        let mut config = SimulationConfig::default();
        config.policy.failure_probability = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::FailureProbability(1.0)));
    }

    #[test]
    fn test_zero_maintenance_interval_rejected() {
        let mut config = SimulationConfig::default();
        config.policy.maintenance_interval_min = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaintenanceInterval { min: 0, max: 5 })
        ));
    }

    #[test]
    fn test_fingerprint_tracks_config_changes() {
        let a = SimulationConfig::default();
        let b = SimulationConfig {
            rng_seed: 7,
            ..Default::default()
        };

        assert_eq!(a.fingerprint().unwrap(), a.clone().fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);
    }

    #[test]
    fn test_roster_fingerprint_tracks_roster() {
        let config = SimulationConfig::default();
        let atms = vec![AtmDevice::new(0, 5000)];
        let alice = config
            .roster_fingerprint(&[Customer::new("Alice", 500)], &atms)
            .unwrap();
        let bob = config
            .roster_fingerprint(&[Customer::new("Bob", 500)], &atms)
            .unwrap();
        let richer = config
            .roster_fingerprint(&[Customer::new("Alice", 900)], &atms)
            .unwrap();

        assert_ne!(alice, bob);
        assert_ne!(alice, richer);
        assert_ne!(alice, config.fingerprint().unwrap());

        // Generated roster sizes play no part in an explicit run
        let resized = SimulationConfig { num_customers: 7, ..config.clone() };
        assert_eq!(
            alice,
            resized
                .roster_fingerprint(&[Customer::new("Alice", 500)], &atms)
                .unwrap()
        );
    }
}
