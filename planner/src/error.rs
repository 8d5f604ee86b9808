//! Error types for the planner.

use std::path::PathBuf;

/// All errors that can occur during planner operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read portfolio file {path}: {source}")]
    PortfolioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse portfolio JSON: {0}")]
    PortfolioParse(#[from] serde_json::Error),

    #[error("failed to serialize plan JSON: {0}")]
    Output(serde_json::Error),

    #[error("invalid portfolio: {0}")]
    Invalid(#[from] aporte::PortfolioError),

    #[error("target percentages sum to {0:.2}%, expected 100%")]
    TargetSum(f64),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
