//! aporte-planner: command-line contribution planner.
//!
//! Reads holdings and targets from a JSON file (or starts from the configured
//! categories), splits a contribution with the `aporte` calculator, and
//! renders the plan as a table or JSON. The interactive session recomputes
//! after every edit.

pub mod commands;
pub mod config;
pub mod error;
pub mod portfolio_file;
pub mod report;
pub mod session;
