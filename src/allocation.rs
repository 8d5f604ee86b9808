//! CURRENT→TARGET contribution split.
//!
//! Given what is held per category, the target percentages, and a new
//! contribution, computes how much of the contribution each category should
//! receive so the portfolio moves toward its targets.
//!
//! The algorithm:
//!
//! 1. `total_after = Σ value + contribution`
//! 2. `raw[i] = max(0, target[i]/100 · total_after − value[i])`
//! 3. If `Σ raw > contribution`, every `raw[i]` is shrunk by the same factor
//!    `contribution / Σ raw`; otherwise it is used as-is.
//!
//! Overweight categories get zero, never a negative amount, and the shrink is
//! a single global pass: a category capped by scaling does not hand its slack
//! to the others.

use crate::holding::Holding;
use crate::types::{Category, Cents};

/// The value target percentages are expected to add up to.
pub const TARGET_TOTAL_PCT: f64 = 100.0;

/// Absolute tolerance when comparing the target sum against 100.
///
/// Targets are entered with two decimals; any real deviation is at least
/// 0.005 and still triggers a warning.
pub const TARGET_SUM_EPSILON: f64 = 1e-9;

/// Advisory raised when target percentages do not add up to 100.
///
/// The allocation is still computed with the targets as entered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSumWarning {
    /// Actual sum of the target percentages
    pub sum: f64,
}

impl TargetSumWarning {
    /// Return a warning if `sum` is not 100 (within [`TARGET_SUM_EPSILON`]).
    pub fn check(sum: f64) -> Option<Self> {
        if (sum - TARGET_TOTAL_PCT).abs() <= TARGET_SUM_EPSILON {
            None
        } else {
            Some(Self { sum })
        }
    }

    /// Percentage points still to assign (negative if over-assigned).
    pub fn remaining(&self) -> f64 {
        TARGET_TOTAL_PCT - self.sum
    }
}

impl std::fmt::Display for TargetSumWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target percentages sum to {:.2}%/100%", self.sum)
    }
}

/// Derived figures for one category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationLine {
    pub category: Category,
    /// Current value (minor units)
    pub value: Cents,
    /// Share of the current total, in percent (0 when nothing is invested)
    pub current_pct: f64,
    /// Target share as entered
    pub target_pct: f64,
    /// Amount needed to reach target, floored at zero (minor units)
    pub raw_ideal: f64,
    /// Suggested contribution after scaling (minor units)
    pub ideal: f64,
}

/// Result of splitting a contribution across categories.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// One line per category, in portfolio order
    pub lines: Vec<AllocationLine>,
    /// The contribution that was split
    pub contribution: Cents,
    /// Σ current values
    pub total_current: Cents,
    /// `total_current + contribution`
    pub total_after_contribution: Cents,
    /// Σ target percentages
    pub target_sum: f64,
    /// Factor applied to the raw amounts, if they exceeded the contribution
    pub scale: Option<f64>,
    /// Present when the targets do not add up to 100
    pub warning: Option<TargetSumWarning>,
}

/// Compute current percentages and the suggested split of `contribution`.
///
/// Total function: a zero portfolio yields 0% everywhere and no division by
/// zero; an empty slice yields an empty allocation.
pub fn compute_allocation(holdings: &[Holding], contribution: Cents) -> Allocation {
    let total_current: Cents = holdings.iter().map(|h| h.value).sum();
    let total_after = total_current + contribution;
    let total_f = total_current.as_f64();
    let after_f = total_after.as_f64();

    let mut lines: Vec<AllocationLine> = holdings
        .iter()
        .map(|h| {
            let value = h.value.as_f64();
            let current_pct = if total_current.is_zero() {
                0.0
            } else {
                value / total_f * 100.0
            };
            // f64::max drops NaN, so a NaN target contributes nothing
            let raw_ideal = (h.target_pct / 100.0 * after_f - value).max(0.0);
            AllocationLine {
                category: h.category.clone(),
                value: h.value,
                current_pct,
                target_pct: h.target_pct,
                raw_ideal,
                ideal: raw_ideal,
            }
        })
        .collect();

    let raw_sum: f64 = lines.iter().map(|l| l.raw_ideal).sum();
    let budget = contribution.as_f64();

    // raw_sum > budget >= 0 also rules out raw_sum == 0
    let scale = if raw_sum > budget {
        Some(budget / raw_sum)
    } else {
        None
    };
    if let Some(factor) = scale {
        for line in &mut lines {
            line.ideal = line.raw_ideal * factor;
        }
    }

    let target_sum: f64 = holdings.iter().map(|h| h.target_pct).sum();

    Allocation {
        lines,
        contribution,
        total_current,
        total_after_contribution: total_after,
        target_sum,
        scale,
        warning: TargetSumWarning::check(target_sum),
    }
}

impl Allocation {
    /// Per-category current percentages, in portfolio order.
    pub fn current_percentages(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.current_pct).collect()
    }

    /// Per-category suggested contributions (minor units), in portfolio order.
    pub fn ideal_contributions(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.ideal).collect()
    }

    /// Σ raw (unscaled) amounts.
    pub fn raw_sum(&self) -> f64 {
        self.lines.iter().map(|l| l.raw_ideal).sum()
    }

    /// Σ suggested contributions.
    pub fn ideal_sum(&self) -> f64 {
        self.lines.iter().map(|l| l.ideal).sum()
    }

    /// True if the raw amounts had to be shrunk to fit the contribution.
    pub fn is_scaled(&self) -> bool {
        self.scale.is_some()
    }

    /// Part of the contribution left unassigned (minor units, never negative).
    pub fn unallocated(&self) -> f64 {
        (self.contribution.as_f64() - self.ideal_sum()).max(0.0)
    }

    /// Suggested contributions rounded to whole minor units.
    ///
    /// Uses the largest-remainder method: every entry is floored, then the
    /// leftover units go to the largest fractional parts (ties to the earlier
    /// category). The result sums to `round(Σ ideal)` capped at the
    /// contribution, and exactly to the contribution when scaling happened.
    pub fn rounded_ideal(&self) -> Vec<Cents> {
        let goal = if self.is_scaled() {
            self.contribution.0
        } else {
            (self.ideal_sum().round() as u64).min(self.contribution.0)
        };

        let mut rounded: Vec<Cents> = self
            .lines
            .iter()
            .map(|l| Cents(l.ideal.floor() as u64))
            .collect();
        let floored = rounded.iter().fold(0u64, |acc, c| acc.saturating_add(c.0));
        let leftover = goal.saturating_sub(floored) as usize;

        let mut by_remainder: Vec<(usize, f64)> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i, l.ideal - l.ideal.floor()))
            .collect();
        // Stable sort keeps index order among equal remainders
        by_remainder.sort_by(|a, b| b.1.total_cmp(&a.1));

        for &(i, _) in by_remainder.iter().take(leftover) {
            rounded[i].0 = rounded[i].0.saturating_add(1);
        }
        rounded
    }
}
