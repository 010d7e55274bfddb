//! Tests for the Customer model
//!
//! CRITICAL: balance never goes negative; every attempt leaves a ledger entry.

use atm_simulator_core::{Customer, CustomerError, EntryKind, FailureReason, Outcome};

#[test]
fn test_customer_new() {
    let customer = Customer::new("Customer-0", 5000);

    assert_eq!(customer.name(), "Customer-0");
    assert_eq!(customer.balance(), 5000);
    assert!(customer.ledger().is_empty());
}

#[test]
fn test_withdraw_success() {
    let mut customer = Customer::new("Customer-0", 5000);

    assert!(customer.withdraw(1200, 40, "ATM-1").is_ok());
    assert_eq!(customer.balance(), 3800);

    let entry = customer.ledger().last().unwrap();
    assert_eq!(entry.kind, EntryKind::Withdrawal);
    assert_eq!(entry.amount, 1200);
    assert_eq!(entry.timestamp_ms, 40);
    assert_eq!(entry.counterparty.as_deref(), Some("ATM-1"));
    assert_eq!(entry.outcome, Outcome::Completed);
}

#[test]
fn test_withdraw_exact_balance() {
    let mut customer = Customer::new("Customer-0", 2000);

    customer.withdraw(2000, 0, "ATM-0").unwrap();
    assert_eq!(customer.balance(), 0);
}

#[test]
fn test_withdraw_insufficient_balance_records_failure() {
    let mut customer = Customer::new("Customer-0", 500);

    let result = customer.withdraw(1000, 7, "ATM-0");

    assert_eq!(
        result,
        Err(CustomerError::InsufficientBalance {
            required: 1000,
            available: 500
        })
    );
    assert_eq!(customer.balance(), 500);
    assert_eq!(customer.ledger().len(), 1);
    assert_eq!(
        customer.ledger().last().unwrap().outcome.failure_reason(),
        Some(FailureReason::InsufficientBalance)
    );
}

#[test]
fn test_deposit_300_onto_500() {
    let mut customer = Customer::new("Customer-0", 500);

    customer.deposit(300, 0).unwrap();

    assert_eq!(customer.balance(), 800);
    assert_eq!(customer.ledger().len(), 1);
    let entry = &customer.ledger().entries()[0];
    assert_eq!(entry.kind, EntryKind::Deposit);
    assert_eq!(entry.amount, 300);
    assert_eq!(entry.counterparty, None);
}

#[test]
fn test_reject_withdrawal_keeps_balance() {
    let mut customer = Customer::new("Customer-0", 9000);

    customer.reject_withdrawal(500, FailureReason::DeviceDepleted, 3, "ATM-2");

    assert_eq!(customer.balance(), 9000);
    let entry = customer.ledger().last().unwrap();
    assert_eq!(entry.kind, EntryKind::Withdrawal);
    assert_eq!(
        entry.outcome,
        Outcome::Failed {
            reason: FailureReason::DeviceDepleted
        }
    );
}

#[test]
fn test_ledger_preserves_order() {
    let mut customer = Customer::new("Customer-0", 1000);

    customer.deposit(100, 1).unwrap();
    customer.withdraw(5000, 2, "ATM-0").unwrap_err();
    customer.withdraw(600, 3, "ATM-0").unwrap();

    let stamps: Vec<u64> = customer.ledger().iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(stamps, vec![1, 2, 3]);
    assert_eq!(customer.balance(), 500);
}
