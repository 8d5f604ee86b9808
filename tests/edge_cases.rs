// Allow our units.cents digit grouping convention (e.g., 100_00 = 100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Edge-case tests: reference scenarios and adversarial inputs to the public API.

use aporte::{Cents, Holding, Portfolio, TargetSumWarning, compute_allocation};

fn holdings(names: &[&str], values: &[u64], targets: &[f64]) -> Vec<Holding> {
    names
        .iter()
        .zip(values)
        .zip(targets)
        .map(|((&n, &v), &t)| Holding::new(n, t).with_value(Cents(v)))
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn scenario_a_empty_portfolio_exact_fit() {
    let a = compute_allocation(
        &holdings(&["Stocks", "Bonds"], &[0, 0], &[60.0, 40.0]),
        Cents(1000),
    );

    assert_eq!(a.total_after_contribution, Cents(1000));
    assert_eq!(a.lines[0].raw_ideal, 600.0);
    assert_eq!(a.lines[1].raw_ideal, 400.0);
    // sum_raw == contribution → no scaling
    assert!(!a.is_scaled());
    assert_eq!(a.ideal_contributions(), vec![600.0, 400.0]);
}

#[test]
fn scenario_b_zero_contribution() {
    let a = compute_allocation(
        &holdings(&["Stocks", "Bonds"], &[800, 200], &[50.0, 50.0]),
        Cents(0),
    );

    assert_eq!(a.total_after_contribution, Cents(1000));
    assert_eq!(a.lines[0].raw_ideal, 0.0); // max(0, 500 - 800)
    assert_eq!(a.lines[1].raw_ideal, 300.0); // max(0, 500 - 200)
    assert_eq!(a.scale, Some(0.0));
    assert_eq!(a.ideal_contributions(), vec![0.0, 0.0]);
}

#[test]
fn scenario_c_targets_not_100() {
    let a = compute_allocation(
        &holdings(&["Stocks", "Bonds"], &[0, 0], &[30.0, 30.0]),
        Cents(1000),
    );

    assert_eq!(a.target_sum, 60.0);
    assert_eq!(a.warning, Some(TargetSumWarning { sum: 60.0 }));
    // Advisory only: the split still happens with the entered targets
    assert_eq!(a.ideal_contributions(), vec![300.0, 300.0]);
}

#[test]
fn scenario_d_all_zero() {
    let a = compute_allocation(
        &holdings(&["A", "B", "C"], &[0, 0, 0], &[40.0, 40.0, 20.0]),
        Cents(0),
    );

    assert_eq!(a.current_percentages(), vec![0.0, 0.0, 0.0]);
    assert_eq!(a.ideal_contributions(), vec![0.0, 0.0, 0.0]);
    assert!(!a.is_scaled());
    assert!(a.warning.is_none());
}

// ============================================================================
// Clamping and scaling
// ============================================================================

#[test]
fn overweight_never_negative() {
    // Stocks far above target; only bonds can receive money
    let a = compute_allocation(
        &holdings(&["Stocks", "Bonds"], &[10_000_00, 0], &[10.0, 90.0]),
        Cents(100_00),
    );
    assert_eq!(a.lines[0].ideal, 0.0);
    assert!(approx(a.lines[1].ideal, 100_00.0));
}

#[test]
fn scaling_is_single_pass() {
    // total_after = 300 + 100 = 400
    // raw = [max(0, 100-0), max(0, 100-0), max(0, 200-300)] = [100, 100, 0]
    // 200 > 100 → factor 0.5, no redistribution to the zero line
    let a = compute_allocation(
        &holdings(&["A", "B", "C"], &[0, 0, 300], &[25.0, 25.0, 50.0]),
        Cents(100),
    );
    assert_eq!(a.scale, Some(0.5));
    assert_eq!(a.ideal_contributions(), vec![50.0, 50.0, 0.0]);
    assert!(approx(a.ideal_sum(), 100.0));
}

#[test]
fn surplus_contribution_left_unallocated() {
    // Targets sum to 80: only 80% of the new total is asked for
    let a = compute_allocation(
        &holdings(&["A", "B"], &[0, 0], &[40.0, 40.0]),
        Cents(1000),
    );
    assert!(!a.is_scaled());
    assert!(approx(a.unallocated(), 200.0));
}

#[test]
fn targets_above_100_are_scaled_into_budget() {
    let a = compute_allocation(
        &holdings(&["A", "B"], &[0, 0], &[100.0, 100.0]),
        Cents(1000),
    );
    assert_eq!(a.warning, Some(TargetSumWarning { sum: 200.0 }));
    assert_eq!(a.scale, Some(0.5));
    assert_eq!(a.ideal_contributions(), vec![500.0, 500.0]);
}

#[test]
fn huge_values_do_not_overflow() {
    let a = compute_allocation(
        &holdings(&["A", "B"], &[u64::MAX, u64::MAX], &[50.0, 50.0]),
        Cents(u64::MAX),
    );
    assert_eq!(a.total_current, Cents::MAX);
    assert_eq!(a.total_after_contribution, Cents::MAX);
    assert!(a.ideal_contributions().iter().all(|&x| x >= 0.0));
}

#[test]
fn single_category_gets_everything() {
    let a = compute_allocation(&holdings(&["Only"], &[5_000], &[100.0]), Cents(2_500));
    assert_eq!(a.current_percentages(), vec![100.0]);
    assert_eq!(a.ideal_contributions(), vec![2_500.0]);
    assert_eq!(a.rounded_ideal(), vec![Cents(2_500)]);
}

#[test]
fn zero_targets_receive_nothing() {
    let a = compute_allocation(
        &holdings(&["A", "B"], &[100, 100], &[0.0, 0.0]),
        Cents(1000),
    );
    assert_eq!(a.ideal_contributions(), vec![0.0, 0.0]);
    assert_eq!(a.warning, Some(TargetSumWarning { sum: 0.0 }));
}

// ============================================================================
// Session-style editing
// ============================================================================

#[test]
fn idempotent_recompute() {
    let mut p = Portfolio::default();
    p.set_value(0, Cents(12_345_67));
    p.set_value(3, Cents(8_000_00));
    let first = p.allocate(Cents(1_500_00));
    let second = p.allocate(Cents(1_500_00));
    assert_eq!(first, second);
}

#[test]
fn edit_then_recompute_reflects_new_targets() {
    let mut p = Portfolio::new(["Stocks", "Bonds"]).unwrap();
    assert!(p.allocate(Cents(1000)).warning.is_none());

    p.decrement_target(0); // 49 / 50
    let a = p.allocate(Cents(1000));
    assert_eq!(a.warning, Some(TargetSumWarning { sum: 99.0 }));
    assert_eq!(a.ideal_contributions(), vec![490.0, 500.0]);

    p.increment_target(1); // 49 / 51
    assert!(p.allocate(Cents(1000)).warning.is_none());
}

#[test]
fn out_of_range_edits_are_noops() {
    let mut p = Portfolio::default();
    let before = p.clone();
    assert!(!p.set_value(99, Cents(1)));
    assert!(!p.set_target(99, 1.0));
    assert!(!p.increment_target(99));
    assert!(!p.decrement_target(99));
    assert_eq!(p, before);
}
