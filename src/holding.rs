//! Per-category record: what is held now and what share it should have.

use crate::types::{Category, Cents};

/// One asset category in a portfolio.
///
/// Value and target travel together so they can never drift out of
/// alignment with their category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holding {
    /// Asset class this record belongs to
    pub category: Category,
    /// Current market value (minor units)
    pub value: Cents,
    /// Desired share of the post-contribution total, in percentage points
    pub target_pct: f64,
}

impl Holding {
    /// Create a holding with zero value and the given target.
    pub fn new(category: impl Into<Category>, target_pct: f64) -> Self {
        Self {
            category: category.into(),
            value: Cents::ZERO,
            target_pct,
        }
    }

    /// Builder-style setter for the current value.
    pub fn with_value(mut self, value: Cents) -> Self {
        self.value = value;
        self
    }
}
