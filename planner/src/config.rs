//! TOML configuration loading and validation.

use std::path::Path;

use aporte::parse::{cents_from_digits, parse_amount};
use aporte::{Cents, DEFAULT_CATEGORIES, Locale, Portfolio};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Overrides the locale's currency symbol
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency_symbol: None,
        }
    }
}

fn default_locale() -> String {
    "pt-BR".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub amounts: AmountInput,
}

/// How typed currency amounts are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountInput {
    /// Major units with an optional decimal part: `1.234,56`
    #[default]
    Decimal,
    /// Currency mask: all digits are minor units, `123456` = 1.234,56
    Mask,
}

impl AmountInput {
    /// Read `raw` as an amount; unreadable input is zero.
    pub fn parse(self, raw: &str, locale: &Locale) -> Cents {
        match self {
            AmountInput::Decimal => parse_amount(raw, locale),
            AmountInput::Mask => cents_from_digits(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config if the file exists; `None` means the caller uses defaults.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if Locale::from_tag(&self.display.locale).is_none() {
            return Err(Error::Config(format!(
                "unknown locale '{}' (expected pt-BR or en-US)",
                self.display.locale
            )));
        }
        if let Some(symbol) = &self.display.currency_symbol {
            if symbol.trim().is_empty() {
                return Err(Error::Config("currency_symbol must not be empty".into()));
            }
        }
        if self.portfolio.categories.is_empty() {
            return Err(Error::Config("categories must not be empty".into()));
        }
        let mut seen = FxHashSet::default();
        for c in &self.portfolio.categories {
            if c.trim().is_empty() {
                return Err(Error::Config("category names must not be empty".into()));
            }
            if !seen.insert(c.as_str()) {
                return Err(Error::Config(format!("duplicate category: {c}")));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Display locale with any currency override applied.
    pub fn locale(&self) -> Result<Locale> {
        let locale = Locale::from_tag(&self.display.locale)
            .ok_or_else(|| Error::Config(format!("unknown locale '{}'", self.display.locale)))?;
        Ok(match &self.display.currency_symbol {
            Some(symbol) => locale.with_currency_symbol(symbol.clone()),
            None => locale,
        })
    }

    /// Fresh portfolio over the configured categories.
    pub fn default_portfolio(&self) -> Result<Portfolio> {
        Ok(Portfolio::new(self.portfolio.categories.iter().cloned())?)
    }
}
