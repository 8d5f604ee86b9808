//! Property-based tests for allocation invariants.
//!
//! These tests use proptest to verify that key invariants hold
//! across randomly generated portfolios.

use aporte::format::{Locale, format_digits};
use aporte::parse::cents_from_digits;
use aporte::targets;
use aporte::{Cents, Holding, compute_allocation};
use proptest::prelude::*;

/// Generate a holding value (up to 10 billion in major units)
fn value_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), 0u64..=1_000_000_000_000u64]
}

/// Generate a target percentage with two decimals
fn target_strategy() -> impl Strategy<Value = f64> {
    (0u32..=10_000u32).prop_map(|v| v as f64 / 100.0)
}

fn holdings_strategy() -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec((value_strategy(), target_strategy()), 1..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (v, t))| Holding::new(format!("C{i}"), t).with_value(Cents(v)))
            .collect()
    })
}

fn contribution_strategy() -> impl Strategy<Value = Cents> {
    prop_oneof![Just(0u64), 0u64..=100_000_000_00u64].prop_map(Cents)
}

/// Relative tolerance for sums of f64 minor-unit amounts
fn tolerance(scale: f64) -> f64 {
    1e-6 * scale.max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // ========================================================================
    // PERCENTAGE INVARIANTS
    // ========================================================================

    /// Current percentages sum to 100 when something is invested, else all 0
    #[test]
    fn current_percentages_sum(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        let pcts = a.current_percentages();
        if a.total_current.is_zero() {
            prop_assert!(pcts.iter().all(|&p| p == 0.0));
        } else {
            let sum: f64 = pcts.iter().sum();
            prop_assert!((sum - 100.0).abs() < 1e-6, "percentages sum to {}", sum);
        }
    }

    // ========================================================================
    // CONTRIBUTION INVARIANTS
    // ========================================================================

    /// No suggestion is ever negative
    #[test]
    fn ideal_non_negative(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        for line in &a.lines {
            prop_assert!(line.ideal >= 0.0, "{} got {}", line.category, line.ideal);
            prop_assert!(line.raw_ideal >= 0.0);
        }
    }

    /// Suggestions never exceed the contribution
    #[test]
    fn ideal_within_budget(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        let budget = contribution.as_f64();
        prop_assert!(a.ideal_sum() <= budget + tolerance(budget),
            "ideal sum {} > contribution {}", a.ideal_sum(), budget);
    }

    /// Raw amounts that fit are passed through untouched
    #[test]
    fn no_scaling_when_raw_fits(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        if a.raw_sum() <= contribution.as_f64() {
            prop_assert!(a.scale.is_none());
            for line in &a.lines {
                prop_assert_eq!(line.ideal, line.raw_ideal);
            }
        }
    }

    /// Scaling exactly exhausts the contribution
    #[test]
    fn scaling_exhausts_budget(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        let budget = contribution.as_f64();
        if a.raw_sum() > budget && a.raw_sum() > 0.0 {
            prop_assert!(a.is_scaled());
            prop_assert!((a.ideal_sum() - budget).abs() <= tolerance(budget),
                "scaled sum {} != contribution {}", a.ideal_sum(), budget);
        }
    }

    /// Same inputs, same outputs
    #[test]
    fn idempotent(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let first = compute_allocation(&holdings, contribution);
        let second = compute_allocation(&holdings, contribution);
        prop_assert_eq!(first, second);
    }

    /// Whole-unit rounding stays within one unit of each amount and within budget
    #[test]
    fn rounded_ideal_bounded(holdings in holdings_strategy(), contribution in contribution_strategy()) {
        let a = compute_allocation(&holdings, contribution);
        let rounded = a.rounded_ideal();
        let total: u64 = rounded.iter().map(|c| c.0).sum();
        prop_assert!(total <= contribution.0);
        if a.is_scaled() {
            prop_assert_eq!(total, contribution.0);
        }
        for (r, line) in rounded.iter().zip(&a.lines) {
            prop_assert!((r.as_f64() - line.ideal).abs() <= 1.0 + tolerance(line.ideal));
        }
    }

    /// The warning is present exactly when the targets miss 100
    #[test]
    fn warning_matches_target_sum(holdings in holdings_strategy()) {
        let a = compute_allocation(&holdings, Cents(0));
        let sum: f64 = holdings.iter().map(|h| h.target_pct).sum();
        prop_assert_eq!(a.warning.is_some(), (sum - 100.0).abs() > 1e-9);
    }

    // ========================================================================
    // TARGET EDITING INVARIANTS
    // ========================================================================

    /// Stepping up from ≤ 99 never pushes the sum past 100
    #[test]
    fn increment_respects_cap(ts in prop::collection::vec(target_strategy(), 1..8), idx in 0usize..8) {
        let sum: f64 = ts.iter().sum();
        if let Some(v) = targets::increment(&ts, idx) {
            prop_assert!(sum < 100.0);
            prop_assert!((0.0..=100.0).contains(&v));
            if sum <= 99.0 {
                prop_assert!(sum - ts[idx] + v <= 100.0 + 1e-9);
            }
        }
    }

    /// Direct edits never leave the sum above 100 when the others fit
    #[test]
    fn edit_respects_cap(
        ts in prop::collection::vec(target_strategy(), 1..8),
        idx in 0usize..8,
        value in -50.0f64..250.0,
    ) {
        if let Some(v) = targets::edit(&ts, idx, value) {
            let others = targets::sum_excluding(&ts, idx);
            prop_assert!(v >= 0.0);
            if others <= 100.0 {
                prop_assert!(others + v <= 100.0 + 1e-9);
            }
        } else {
            prop_assert!(idx >= ts.len());
        }
    }

    /// Decrement never goes below zero and only moves one category
    #[test]
    fn decrement_floor(ts in prop::collection::vec(target_strategy(), 1..8), idx in 0usize..8) {
        match targets::decrement(&ts, idx) {
            Some(v) => prop_assert_eq!(v, (ts[idx] - 1.0).max(0.0)),
            None => prop_assert!(idx >= ts.len()),
        }
    }

    // ========================================================================
    // BOUNDARY
    // ========================================================================

    /// The currency mask renders digits that parse back to the same amount
    #[test]
    fn digit_mask_round_trip(amount in 0u64..=1_000_000_000_000u64) {
        let locale = Locale::pt_br();
        let masked = format_digits(&amount.to_string(), &locale);
        prop_assert_eq!(cents_from_digits(&masked), Cents(amount));
    }
}
