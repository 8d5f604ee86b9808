//! CLI entry point for the contribution planner.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::info;

use aporte_planner::commands::{self, PlanOptions};
use aporte_planner::config::Config;
use aporte_planner::error::Error;
use aporte_planner::portfolio_file::PortfolioFile;
use aporte_planner::session::TerminalPrompter;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Split a contribution across asset categories toward target percentages")]
#[command(version)]
struct Cli {
    /// Path to planner.toml (defaults are used if it does not exist)
    #[arg(long, default_value = "planner.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute and print the suggested contribution split
    Plan {
        /// Path to portfolio.json
        portfolio: PathBuf,

        /// Contribution amount, overriding the file (e.g. "1.500,00")
        #[arg(long)]
        contribution: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Edit values and targets interactively, recomputing after each change
    Session {
        /// Optional portfolio.json to start from
        portfolio: Option<PathBuf>,

        /// Initial contribution amount
        #[arg(long)]
        contribution: Option<String>,
    },

    /// Validate a portfolio file and its target percentages
    Check {
        /// Path to portfolio.json
        portfolio: PathBuf,
    },
}

fn load_portfolio(path: &Path) -> PortfolioFile {
    match PortfolioFile::load(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading portfolio: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let loaded = match Config::load_optional(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };
    let using_defaults = loaded.is_none();
    let config = loaded.unwrap_or_default();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp_secs()
    .init();

    if using_defaults {
        info!("No config at {}, using defaults", cli.config.display());
    }

    let mut stdout = io::stdout().lock();

    let result = match cli.command {
        Command::Plan {
            portfolio,
            contribution,
            json,
        } => {
            let file = load_portfolio(&portfolio);
            let opts = PlanOptions { contribution, json };
            commands::run_plan(&config, &file, &opts, &mut stdout)
        }
        Command::Session {
            portfolio,
            contribution,
        } => {
            let file = portfolio.as_deref().map(load_portfolio);
            commands::run_session(
                &config,
                file.as_ref(),
                contribution.as_deref(),
                &mut TerminalPrompter,
                &mut stdout,
            )
        }
        Command::Check { portfolio } => {
            let file = load_portfolio(&portfolio);
            commands::run_check(&config, &file, &mut stdout)
        }
    };

    if let Err(e) = result {
        match &e {
            Error::TargetSum(_) => process::exit(3),
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
