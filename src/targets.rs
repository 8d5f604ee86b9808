//! Target percentage adjustment rules.
//!
//! Pure functions over a slice of targets (percentage points). Each returns
//! the new value for the edited category, or `None` when the edit is rejected
//! or the index is out of range. Callers apply the result themselves.

use crate::allocation::TARGET_SUM_EPSILON;

/// Upper bound for a single target and for the sum of all targets.
pub const MAX_TARGET_PCT: f64 = 100.0;

/// Size of one +/- step, in percentage points.
pub const STEP_PCT: f64 = 1.0;

/// Raise `targets[index]` by one point.
///
/// Rejected when the targets already sum to 100 or more, within
/// [`TARGET_SUM_EPSILON`], the same tolerance the target-sum warning uses.
/// Otherwise the new value is clamped to `[0, 100]`. Only the pre-step sum is
/// checked, so a sum of 99.5 may step to 100.5.
pub fn increment(targets: &[f64], index: usize) -> Option<f64> {
    let current = *targets.get(index)?;
    let total: f64 = targets.iter().sum();
    if total >= MAX_TARGET_PCT - TARGET_SUM_EPSILON {
        return None;
    }
    Some((current + STEP_PCT).clamp(0.0, MAX_TARGET_PCT))
}

/// Lower `targets[index]` by one point, stopping at zero.
pub fn decrement(targets: &[f64], index: usize) -> Option<f64> {
    let current = *targets.get(index)?;
    Some((current - STEP_PCT).max(0.0))
}

/// Set `targets[index]` to `value`, capped so the sum stays within 100.
///
/// Non-finite or negative input is treated as zero. If `value` plus the sum
/// of the other targets would exceed 100, the result is whatever is left:
/// `100 - Σ others` (never below zero).
pub fn edit(targets: &[f64], index: usize, value: f64) -> Option<f64> {
    targets.get(index)?;
    let value = sanitize(value);
    let others = sum_excluding(targets, index);
    if value + others > MAX_TARGET_PCT {
        Some((MAX_TARGET_PCT - others).max(0.0))
    } else {
        Some(value)
    }
}

/// Sum of all targets except the one at `index`.
pub fn sum_excluding(targets: &[f64], index: usize) -> f64 {
    targets
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, t)| t)
        .sum()
}

/// Round to two decimal places, the precision targets are entered and shown with.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coerce anything that is not a finite non-negative number to zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
