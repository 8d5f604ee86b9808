//! Interactive calculation session.
//!
//! A [`Session`] holds the in-memory portfolio and contribution. Every
//! [`Input`] is applied and the allocation is recomputed from scratch. Nothing
//! is cached and nothing outlives the session.
//!
//! Console interaction goes through the [`Prompter`] trait so the loop can be
//! driven by a script in tests.

use std::io::Write;

use aporte::format::{format_cents, format_digits, format_percent};
use aporte::parse::parse_percentage;
use aporte::{Allocation, Cents, Locale, Portfolio};
use log::{debug, warn};

use crate::config::{AmountInput, Config};
use crate::error::Result;
use crate::report::PlanReport;

/// One user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    SetValue { index: usize, value: Cents },
    SetContribution(Cents),
    SetTarget { index: usize, pct: f64 },
    IncrementTarget(usize),
    DecrementTarget(usize),
    Reset,
}

/// Result of applying an input.
#[derive(Debug, Clone)]
pub struct Update {
    /// False if the input was rejected or out of range
    pub changed: bool,
    pub allocation: Allocation,
}

/// Session state: portfolio plus the contribution being split.
#[derive(Debug, Clone)]
pub struct Session {
    portfolio: Portfolio,
    contribution: Cents,
}

impl Session {
    pub fn new(portfolio: Portfolio, contribution: Cents) -> Self {
        Self {
            portfolio,
            contribution,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn contribution(&self) -> Cents {
        self.contribution
    }

    /// Current allocation, computed fresh.
    pub fn allocation(&self) -> Allocation {
        self.portfolio.allocate(self.contribution)
    }

    /// Apply one edit and recompute.
    pub fn apply(&mut self, input: Input) -> Update {
        let changed = match &input {
            Input::SetValue { index, value } => self.portfolio.set_value(*index, *value),
            Input::SetContribution(amount) => {
                self.contribution = *amount;
                true
            }
            Input::SetTarget { index, pct } => self.portfolio.set_target(*index, *pct),
            Input::IncrementTarget(index) => self.portfolio.increment_target(*index),
            Input::DecrementTarget(index) => self.portfolio.decrement_target(*index),
            Input::Reset => {
                self.portfolio.reset();
                self.contribution = Cents::ZERO;
                true
            }
        };

        let allocation = self.allocation();
        debug!(
            "Applied {input:?} (changed={changed}): total {} + {}",
            allocation.total_current, allocation.contribution
        );
        Update {
            changed,
            allocation,
        }
    }
}

/// Menu entries of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetValue,
    SetContribution,
    EditTarget,
    IncrementTarget,
    DecrementTarget,
    Reset,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::SetValue,
        MenuChoice::SetContribution,
        MenuChoice::EditTarget,
        MenuChoice::IncrementTarget,
        MenuChoice::DecrementTarget,
        MenuChoice::Reset,
        MenuChoice::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::SetValue => "Set current value",
            MenuChoice::SetContribution => "Set contribution",
            MenuChoice::EditTarget => "Edit target %",
            MenuChoice::IncrementTarget => "Target +1",
            MenuChoice::DecrementTarget => "Target -1",
            MenuChoice::Reset => "Reset",
            MenuChoice::Quit => "Quit",
        }
    }
}

/// Source of user choices for the interactive loop.
pub trait Prompter {
    fn menu(&mut self) -> Result<MenuChoice>;
    fn category(&mut self, names: &[&str]) -> Result<usize>;
    fn text(&mut self, prompt: &str) -> Result<String>;
}

/// Terminal prompter backed by `dialoguer`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn menu(&mut self) -> Result<MenuChoice> {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        let picked = dialoguer::Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact_opt()?;
        // Esc / q ends the session
        Ok(picked.map_or(MenuChoice::Quit, |i| MenuChoice::ALL[i]))
    }

    fn category(&mut self, names: &[&str]) -> Result<usize> {
        Ok(dialoguer::Select::new()
            .with_prompt("Category")
            .items(names)
            .default(0)
            .interact()?)
    }

    fn text(&mut self, prompt: &str) -> Result<String> {
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }
}

/// Drive a session until the user quits, re-rendering after every edit.
pub fn run_interactive<P: Prompter, W: Write>(
    session: &mut Session,
    prompter: &mut P,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let locale = config.locale()?;
    let amounts = config.input.amounts;

    write!(out, "{}", PlanReport::new(&session.allocation(), &locale))?;

    loop {
        let choice = prompter.menu()?;
        let input = match read_input(choice, session, prompter, amounts, &locale, out)? {
            Some(input) => input,
            None => break,
        };

        let update = session.apply(input.clone());
        if !update.changed {
            let note = rejection_note(&input, session.portfolio(), &locale);
            warn!("{note}");
            writeln!(out, "{note}")?;
        }
        writeln!(out)?;
        write!(out, "{}", PlanReport::new(&update.allocation, &locale))?;
    }

    writeln!(out, "Session ended.")?;
    Ok(())
}

/// Turn a menu choice into an edit, asking for whatever it needs.
fn read_input<P: Prompter, W: Write>(
    choice: MenuChoice,
    session: &Session,
    prompter: &mut P,
    amounts: AmountInput,
    locale: &Locale,
    out: &mut W,
) -> Result<Option<Input>> {
    let names: Vec<&str> = session
        .portfolio()
        .categories()
        .map(|c| c.as_str())
        .collect();
    let name = |index: usize| names.get(index).copied().unwrap_or("?");

    let input = match choice {
        MenuChoice::Quit => return Ok(None),
        MenuChoice::Reset => Input::Reset,
        MenuChoice::SetContribution => {
            let raw = prompter.text("Contribution")?;
            echo_amount(&raw, amounts, locale, out)?;
            Input::SetContribution(amounts.parse(&raw, locale))
        }
        MenuChoice::SetValue => {
            let index = prompter.category(&names)?;
            let raw = prompter.text(&format!("Current value of {}", name(index)))?;
            echo_amount(&raw, amounts, locale, out)?;
            Input::SetValue {
                index,
                value: amounts.parse(&raw, locale),
            }
        }
        MenuChoice::EditTarget => {
            let index = prompter.category(&names)?;
            let raw = prompter.text(&format!("Target % for {}", name(index)))?;
            Input::SetTarget {
                index,
                pct: parse_percentage(&raw, locale),
            }
        }
        MenuChoice::IncrementTarget => Input::IncrementTarget(prompter.category(&names)?),
        MenuChoice::DecrementTarget => Input::DecrementTarget(prompter.category(&names)?),
    };
    Ok(Some(input))
}

/// Show how a typed amount was read.
fn echo_amount<W: Write>(
    raw: &str,
    amounts: AmountInput,
    locale: &Locale,
    out: &mut W,
) -> Result<()> {
    let shown = match amounts {
        AmountInput::Mask => format_digits(raw, locale),
        AmountInput::Decimal => format_cents(amounts.parse(raw, locale), locale),
    };
    writeln!(out, "  → {shown}")?;
    Ok(())
}

fn rejection_note(input: &Input, portfolio: &Portfolio, locale: &Locale) -> String {
    match input {
        Input::IncrementTarget(_) => format!(
            "Targets already sum to {}%; lower another category first.",
            format_percent(portfolio.target_sum(), locale)
        ),
        _ => "Input ignored: no such category.".to_string(),
    }
}
