//! Tests for SimClock

use atm_simulator_core::SimClock;

#[test]
fn test_clock_new() {
    let clock = SimClock::new();
    assert_eq!(clock.current_round(), 0);
    assert_eq!(clock.now(), 0);
}

#[test]
fn test_begin_round_is_one_based() {
    let mut clock = SimClock::new();

    assert_eq!(clock.begin_round(), 1);
    assert_eq!(clock.begin_round(), 2);
    assert_eq!(clock.current_round(), 2);
}

#[test]
fn test_advance_accumulates() {
    let mut clock = SimClock::new();

    clock.advance(500);
    clock.advance(250);
    assert_eq!(clock.now(), 750);
}

#[test]
fn test_rounds_do_not_move_time() {
    let mut clock = SimClock::new();
    clock.advance(100);
    clock.begin_round();
    assert_eq!(clock.now(), 100);
}
