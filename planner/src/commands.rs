//! Command orchestration: load → compute → render.
//!
//! Ties together config, portfolio input, the calculator and the report.

use std::io::Write;

use aporte::{Allocation, Cents, Locale};
use log::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::portfolio_file::PortfolioFile;
use crate::report::{PlanJson, PlanReport};
use crate::session::{self, Prompter, Session};

/// Options for a one-shot plan.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Overrides the file's contribution, read per `[input] amounts`
    pub contribution: Option<String>,
    /// Emit JSON instead of the text report
    pub json: bool,
}

/// Compute and print a plan for a portfolio file.
pub fn run_plan<W: Write>(
    config: &Config,
    file: &PortfolioFile,
    opts: &PlanOptions,
    out: &mut W,
) -> Result<()> {
    let locale = config.locale()?;
    let portfolio = file.to_portfolio()?;
    info!("Loaded portfolio with {} categories", portfolio.len());

    let contribution =
        resolve_contribution(config, file.contribution(), opts.contribution.as_deref(), &locale);
    let allocation = portfolio.allocate(contribution);
    log_allocation(&allocation);

    if opts.json {
        let json = serde_json::to_string_pretty(&PlanJson::new(&allocation, &locale))
            .map_err(Error::Output)?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", PlanReport::new(&allocation, &locale))?;
    }
    Ok(())
}

/// Validate a portfolio file and report whether its targets sum to 100.
pub fn run_check<W: Write>(config: &Config, file: &PortfolioFile, out: &mut W) -> Result<()> {
    let locale = config.locale()?;
    let portfolio = file.to_portfolio()?;
    let allocation = portfolio.allocate(file.contribution());

    match allocation.warning {
        Some(warning) => {
            writeln!(out, "{}", warning.message(&locale))?;
            Err(Error::TargetSum(warning.sum))
        }
        None => {
            writeln!(out, "OK: {} categories, targets sum to 100%.", portfolio.len())?;
            Ok(())
        }
    }
}

/// Start an interactive session, from a file or the configured categories.
pub fn run_session<P: Prompter, W: Write>(
    config: &Config,
    file: Option<&PortfolioFile>,
    contribution: Option<&str>,
    prompter: &mut P,
    out: &mut W,
) -> Result<()> {
    let locale = config.locale()?;
    let (portfolio, file_contribution) = match file {
        Some(f) => (f.to_portfolio()?, f.contribution()),
        None => (config.default_portfolio()?, Cents::ZERO),
    };
    info!("Session started with {} categories", portfolio.len());

    let contribution = resolve_contribution(config, file_contribution, contribution, &locale);
    let mut session = Session::new(portfolio, contribution);
    session::run_interactive(&mut session, prompter, config, out)
}

/// The flag wins over the file; unreadable flag input is zero.
pub fn resolve_contribution(
    config: &Config,
    from_file: Cents,
    flag: Option<&str>,
    locale: &Locale,
) -> Cents {
    match flag {
        Some(raw) => config.input.amounts.parse(raw, locale),
        None => from_file,
    }
}

fn log_allocation(allocation: &Allocation) {
    info!(
        "Plan computed: invested {}, contribution {}, after {}",
        allocation.total_current, allocation.contribution, allocation.total_after_contribution
    );
    if let Some(factor) = allocation.scale {
        warn!(
            "Needs of {:.2} exceed the contribution; scaled by {factor:.4}",
            allocation.raw_sum() / 100.0
        );
    }
    if let Some(warning) = &allocation.warning {
        warn!("{warning}");
    }
}
