//! Validation errors for building a portfolio from external records.
//!
//! The allocation math itself never fails; these only guard construction.

/// Errors returned by [`Portfolio::from_holdings`](crate::Portfolio::from_holdings).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortfolioError {
    /// At least one category is required.
    #[error("portfolio has no categories")]
    Empty,
    /// Category names identify holdings and must be non-empty.
    #[error("category at position {0} has an empty name")]
    EmptyCategory(usize),
    /// Each category may appear only once.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),
    /// Targets are percentage points in `[0, +inf)`.
    #[error("target for {category} must be a non-negative number, got {value}")]
    InvalidTarget { category: String, value: f64 },
}
