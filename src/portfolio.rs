//! Session state: a fixed, ordered set of holdings.
//!
//! A [`Portfolio`] owns one [`Holding`] per category. The category set is
//! fixed at construction; values and targets are edited in place and the
//! allocation is recomputed from scratch on demand.
//!
//! # Example
//!
//! ```
//! use aporte::{Cents, Portfolio};
//!
//! let mut portfolio = Portfolio::new(["Stocks", "Bonds"]).unwrap();
//! // Targets start at 50/50; lower one before raising the other
//! portfolio.set_target(1, 40.0);
//! portfolio.set_target(0, 60.0);
//!
//! let allocation = portfolio.allocate(Cents(1000));
//! assert_eq!(allocation.ideal_contributions(), vec![600.0, 400.0]);
//! assert!(allocation.warning.is_none());
//! ```

use std::collections::HashSet;

use crate::allocation::{Allocation, TARGET_TOTAL_PCT, compute_allocation};
use crate::error::PortfolioError;
use crate::holding::Holding;
use crate::targets;
use crate::types::{Category, Cents};

/// Categories used when nothing else is configured.
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Ações BR", "Ações EUA", "FIIs", "Renda Fixa", "Cripto"];

/// Ordered holdings for one calculation session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_CATEGORIES.iter().map(|&c| Category::new(c)).collect())
    }
}

impl Portfolio {
    /// Create a portfolio with zero values and equal targets.
    ///
    /// Each target starts at `100 / n` rounded to two decimals (20.00 for five
    /// categories).
    pub fn new<I, C>(categories: I) -> Result<Self, PortfolioError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        validate_categories(&categories)?;
        Ok(Self::with_defaults(categories))
    }

    /// Build from externally supplied records, validating them.
    pub fn from_holdings(holdings: Vec<Holding>) -> Result<Self, PortfolioError> {
        let categories: Vec<Category> = holdings.iter().map(|h| h.category.clone()).collect();
        validate_categories(&categories)?;
        for h in &holdings {
            if !h.target_pct.is_finite() || h.target_pct < 0.0 {
                return Err(PortfolioError::InvalidTarget {
                    category: h.category.to_string(),
                    value: h.target_pct,
                });
            }
        }
        Ok(Self { holdings })
    }

    fn with_defaults(categories: Vec<Category>) -> Self {
        let target = default_target(categories.len());
        Self {
            holdings: categories
                .into_iter()
                .map(|c| Holding::new(c, target))
                .collect(),
        }
    }

    /// Restore zero values and equal targets, keeping the categories.
    pub fn reset(&mut self) {
        let target = default_target(self.holdings.len());
        for h in &mut self.holdings {
            h.value = Cents::ZERO;
            h.target_pct = target;
        }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Always false for a validated portfolio.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Index of the category with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.holdings
            .iter()
            .position(|h| h.category.as_str() == name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.holdings.iter().map(|h| &h.category)
    }

    pub fn values(&self) -> Vec<Cents> {
        self.holdings.iter().map(|h| h.value).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.holdings.iter().map(|h| h.target_pct).collect()
    }

    pub fn target_sum(&self) -> f64 {
        self.holdings.iter().map(|h| h.target_pct).sum()
    }

    /// Percentage points left before the targets reach 100 (may be negative).
    pub fn target_remaining(&self) -> f64 {
        TARGET_TOTAL_PCT - self.target_sum()
    }

    /// Set the current value of a category. Returns false if out of range.
    pub fn set_value(&mut self, index: usize, value: Cents) -> bool {
        match self.holdings.get_mut(index) {
            Some(h) => {
                h.value = value;
                true
            }
            None => false,
        }
    }

    /// Set a target directly, capped at `100 - Σ others`.
    ///
    /// The stored value is rounded to two decimals. Returns false if the
    /// index is out of range.
    pub fn set_target(&mut self, index: usize, value: f64) -> bool {
        let targets = self.targets();
        match targets::edit(&targets, index, value) {
            Some(v) => {
                self.holdings[index].target_pct = targets::round_hundredths(v);
                true
            }
            None => false,
        }
    }

    /// Step a target up by one point.
    ///
    /// Returns false if rejected (targets already at 100) or out of range.
    /// On success every target is normalized to two decimals.
    pub fn increment_target(&mut self, index: usize) -> bool {
        let targets = self.targets();
        self.apply_step(index, targets::increment(&targets, index))
    }

    /// Step a target down by one point, stopping at zero.
    pub fn decrement_target(&mut self, index: usize) -> bool {
        let targets = self.targets();
        self.apply_step(index, targets::decrement(&targets, index))
    }

    fn apply_step(&mut self, index: usize, stepped: Option<f64>) -> bool {
        let Some(v) = stepped else {
            return false;
        };
        self.holdings[index].target_pct = v;
        for h in &mut self.holdings {
            h.target_pct = targets::round_hundredths(h.target_pct);
        }
        true
    }

    /// Split `contribution` across the holdings.
    pub fn allocate(&self, contribution: Cents) -> Allocation {
        compute_allocation(&self.holdings, contribution)
    }
}

/// Equal share of 100 for `n` categories, rounded to two decimals.
pub fn default_target(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    targets::round_hundredths(TARGET_TOTAL_PCT / n as f64)
}

fn validate_categories(categories: &[Category]) -> Result<(), PortfolioError> {
    if categories.is_empty() {
        return Err(PortfolioError::Empty);
    }
    let mut seen = HashSet::new();
    for (i, c) in categories.iter().enumerate() {
        if c.as_str().trim().is_empty() {
            return Err(PortfolioError::EmptyCategory(i));
        }
        if !seen.insert(c.as_str()) {
            return Err(PortfolioError::DuplicateCategory(c.to_string()));
        }
    }
    Ok(())
}
