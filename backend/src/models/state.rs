//! Simulation State
//!
//! Holds the roster of a run: every customer and every ATM device, in the
//! order they were configured. The orchestrator owns exactly one of these
//! per run; no agent outlives it.
//!
//! # Critical Invariants
//!
//! 1. **Non-negative money**: customer balances and device reserves are >= 0
//! 2. **Unique identities**: customer names and device ids are unique
//! 3. **Stable order**: roster order never changes during a run

use crate::models::atm::AtmDevice;
use crate::models::customer::Customer;

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use atm_simulator_core::{AtmDevice, Customer, SimulationState};
///
/// let state = SimulationState::new(
///     vec![Customer::new("Customer-0", 5000)],
///     vec![AtmDevice::new(0, 8000), AtmDevice::new(1, 6000)],
/// );
/// assert_eq!(state.num_customers(), 1);
/// assert_eq!(state.enabled_atm_indices(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    customers: Vec<Customer>,
    atms: Vec<AtmDevice>,
}

impl SimulationState {
    pub fn new(customers: Vec<Customer>, atms: Vec<AtmDevice>) -> Self {
        Self { customers, atms }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn atms(&self) -> &[AtmDevice] {
        &self.atms
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn num_atms(&self) -> usize {
        self.atms.len()
    }

    pub fn get_customer(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.name() == name)
    }

    pub fn get_atm(&self, id: usize) -> Option<&AtmDevice> {
        self.atms.iter().find(|a| a.id() == id)
    }

    /// Roster positions of devices currently in service
    pub fn enabled_atm_indices(&self) -> Vec<usize> {
        self.atms
            .iter()
            .enumerate()
            .filter(|(_, atm)| atm.is_enabled())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn any_atm_enabled(&self) -> bool {
        self.atms.iter().any(|a| a.is_enabled())
    }

    /// Borrow one customer and one device mutably at the same time
    ///
    /// # Panics
    /// Panics if either position is out of bounds
    pub(crate) fn pair_mut(&mut self, customer_idx: usize, atm_idx: usize) -> (&mut Customer, &mut AtmDevice) {
        (&mut self.customers[customer_idx], &mut self.atms[atm_idx])
    }

    pub(crate) fn customer_at_mut(&mut self, idx: usize) -> &mut Customer {
        &mut self.customers[idx]
    }

    pub(crate) fn atm_at_mut(&mut self, idx: usize) -> &mut AtmDevice {
        &mut self.atms[idx]
    }

    /// Sum of all customer balances
    pub fn total_customer_balance(&self) -> i64 {
        self.customers.iter().map(|c| c.balance()).sum()
    }

    /// Sum of all device reserves
    pub fn total_cash_reserve(&self) -> i64 {
        self.atms.iter().map(|a| a.cash_reserve()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_indices_skip_disabled() {
        let mut state = SimulationState::new(
            vec![],
            vec![AtmDevice::new(0, 100), AtmDevice::new(1, 100), AtmDevice::new(2, 100)],
        );
        state.atm_at_mut(1).disable();

        assert_eq!(state.enabled_atm_indices(), vec![0, 2]);
        assert!(state.any_atm_enabled());
    }

    #[test]
    fn test_totals() {
        let state = SimulationState::new(
            vec![Customer::new("a", 300), Customer::new("b", 700)],
            vec![AtmDevice::new(0, 5000)],
        );
        assert_eq!(state.total_customer_balance(), 1000);
        assert_eq!(state.total_cash_reserve(), 5000);
        assert!(state.get_customer("b").is_some());
        assert!(state.get_atm(3).is_none());
    }
}
