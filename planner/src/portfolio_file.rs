//! Portfolio input file (portfolio.json) loading and validation.
//!
//! The file is only read. Nothing the planner computes is written back.

use std::path::Path;

use aporte::{Category, Cents, Holding, Portfolio};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Holdings and contribution as supplied by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    #[serde(default)]
    pub contribution_cents: u64,
    pub holdings: Vec<HoldingEntry>,
}

/// One category row.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingEntry {
    pub category: String,
    #[serde(default)]
    pub value_cents: u64,
    pub target_pct: f64,
}

impl PortfolioFile {
    /// Load and validate a portfolio.json file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::PortfolioRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PortfolioFile = serde_json::from_str(json)?;
        file.to_portfolio()?;
        Ok(file)
    }

    /// Build a validated [`Portfolio`] from the rows.
    pub fn to_portfolio(&self) -> Result<Portfolio> {
        let holdings = self
            .holdings
            .iter()
            .map(|h| {
                Holding::new(Category::new(h.category.as_str()), h.target_pct)
                    .with_value(Cents(h.value_cents))
            })
            .collect();
        Ok(Portfolio::from_holdings(holdings)?)
    }

    pub fn contribution(&self) -> Cents {
        Cents(self.contribution_cents)
    }
}
