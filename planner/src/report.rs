//! Plan rendering: text table and JSON.

use aporte::format::{format_amount, format_cents, format_percent, format_percent_sign};
use aporte::{Allocation, Locale};
use serde::Serialize;

/// Text report for one computed allocation.
pub struct PlanReport<'a> {
    pub allocation: &'a Allocation,
    pub locale: &'a Locale,
}

impl<'a> PlanReport<'a> {
    pub fn new(allocation: &'a Allocation, locale: &'a Locale) -> Self {
        Self { allocation, locale }
    }
}

impl std::fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let a = self.allocation;
        let l = self.locale;

        writeln!(f, "PORTFOLIO:")?;
        writeln!(f, "  Total invested:   {}", format_cents(a.total_current, l))?;
        writeln!(f, "  Contribution:     {}", format_cents(a.contribution, l))?;
        writeln!(
            f,
            "  After:            {}",
            format_cents(a.total_after_contribution, l)
        )?;

        let width = a
            .lines
            .iter()
            .map(|line| line.category.as_str().chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        writeln!(f, "\nSUGGESTED CONTRIBUTION:")?;
        writeln!(
            f,
            "  {:width$} {:>18} {:>9} {:>9} {:>18}",
            "Category", "Value", "Current", "Target", "Contribute"
        )?;
        for (line, amount) in a.lines.iter().zip(a.rounded_ideal()) {
            writeln!(
                f,
                "  {:width$} {:>18} {:>9} {:>9} {:>18}",
                line.category.as_str(),
                format_cents(line.value, l),
                format_percent_sign(line.current_pct, l),
                format_percent_sign(line.target_pct, l),
                format_cents(amount, l),
            )?;
        }

        if let Some(factor) = a.scale {
            writeln!(
                f,
                "\n  Needs of {} exceed the contribution; scaled to {}",
                format_amount(a.raw_sum(), l),
                format_percent_sign(factor * 100.0, l),
            )?;
        } else if a.unallocated() >= 0.5 {
            writeln!(
                f,
                "\n  Unallocated: {}",
                format_amount(a.unallocated(), l)
            )?;
        }

        if let Some(warning) = &a.warning {
            writeln!(f, "\n  WARNING: {}", warning.message(l))?;
        }
        Ok(())
    }
}

/// Machine-readable plan for `--json`.
#[derive(Debug, Serialize)]
pub struct PlanJson<'a> {
    #[serde(flatten)]
    pub allocation: &'a Allocation,
    /// Suggested contributions rounded to whole minor units
    pub rounded_ideal: Vec<u64>,
    /// Target sum rendered in the configured locale
    pub target_sum_display: String,
    pub warning_message: Option<String>,
}

impl<'a> PlanJson<'a> {
    pub fn new(allocation: &'a Allocation, locale: &Locale) -> Self {
        Self {
            allocation,
            rounded_ideal: allocation.rounded_ideal().iter().map(|c| c.0).collect(),
            target_sum_display: format_percent(allocation.target_sum, locale),
            warning_message: allocation.warning.map(|w| w.message(locale)),
        }
    }
}
