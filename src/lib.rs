// Allow our units.cents digit grouping convention (e.g., 100_00 = 100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # aporte
//!
//! A deterministic calculator for splitting a new contribution across asset
//! categories so a portfolio moves toward its target allocation.
//!
//! ## Features
//!
//! - **Exact money**: holdings and contributions are integer minor units ([`Cents`])
//! - **No negative suggestions**: overweight categories receive zero
//! - **Budget-safe**: when the raw needs exceed the contribution, all of them
//!   shrink by one common factor so the suggestions never exceed it
//! - **Advisory validation**: targets not summing to 100 raise a warning, not an error
//! - **Pure**: same inputs, same outputs; no I/O, no hidden state
//!
//! ## Quick Start
//!
//! ```
//! use aporte::{Cents, Holding, compute_allocation};
//!
//! let holdings = [
//!     Holding::new("Stocks", 50.0).with_value(Cents(800)),
//!     Holding::new("Bonds", 50.0).with_value(Cents(200)),
//! ];
//!
//! // Total after contribution = 1000 + 600 = 1600 → 800 each
//! let allocation = compute_allocation(&holdings, Cents(600));
//!
//! assert_eq!(allocation.total_current, Cents(1000));
//! assert_eq!(allocation.current_percentages(), vec![80.0, 20.0]);
//! assert_eq!(allocation.ideal_contributions(), vec![0.0, 600.0]);
//! assert!(allocation.warning.is_none());
//! ```
//!
//! ## Scaling
//!
//! ```
//! use aporte::{Cents, Holding, compute_allocation};
//!
//! let holdings = [
//!     Holding::new("Stocks", 50.0).with_value(Cents(900)),
//!     Holding::new("Bonds", 50.0).with_value(Cents(100)),
//! ];
//!
//! // Bonds need 500 to reach 50% of 1200 but only 200 is available
//! let allocation = compute_allocation(&holdings, Cents(200));
//! assert!(allocation.is_scaled());
//! assert_eq!(allocation.rounded_ideal(), vec![Cents(0), Cents(200)]);
//! ```
//!
//! ## Boundary helpers
//!
//! ```
//! use aporte::format::{Locale, format_cents};
//! use aporte::parse::{cents_from_digits, parse_percentage};
//!
//! let pt = Locale::pt_br();
//! assert_eq!(cents_from_digits("R$ 1.234,56").0, 1_234_56);
//! assert_eq!(parse_percentage("12,5", &pt), 12.5);
//! assert_eq!(format_cents(aporte::Cents(1_234_56), &pt), "R$ 1.234,56");
//! ```

pub mod allocation;
mod error;
pub mod format;
mod holding;
pub mod parse;
mod portfolio;
pub mod targets;
mod types;

// Re-export public API
pub use allocation::{
    Allocation, AllocationLine, TARGET_SUM_EPSILON, TARGET_TOTAL_PCT, TargetSumWarning,
    compute_allocation,
};
pub use error::PortfolioError;
pub use format::Locale;
pub use holding::Holding;
pub use portfolio::{DEFAULT_CATEGORIES, Portfolio, default_target};
pub use types::{Category, Cents};
