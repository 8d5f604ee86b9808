//! Locale-aware rendering of amounts and percentages.
//!
//! Display only: nothing here feeds back into the calculation.

use crate::allocation::TargetSumWarning;
use crate::types::Cents;

/// Number and currency conventions for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl Locale {
    /// Brazilian Portuguese: `R$ 1.234,56`.
    pub fn pt_br() -> Self {
        Self {
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }

    /// US English: `$ 1,234.56`.
    pub fn en_us() -> Self {
        Self {
            currency_symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }

    /// Look up a preset by BCP 47 tag (case-insensitive, `_` or `-`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Some(Self::pt_br()),
            "en-us" | "en" => Some(Self::en_us()),
            _ => None,
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

/// Insert the grouping separator every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Render minor units as a currency string: `R$ 1.234,56`.
pub fn format_cents(amount: Cents, locale: &Locale) -> String {
    let major = (amount.0 / 100).to_string();
    format!(
        "{} {}{}{:02}",
        locale.currency_symbol,
        group_thousands(&major, locale.grouping_separator),
        locale.decimal_separator,
        amount.0 % 100,
    )
}

/// Render a real-valued minor-unit amount, rounded to the nearest unit.
///
/// Negative and NaN inputs render as zero.
pub fn format_amount(minor_units: f64, locale: &Locale) -> String {
    let units = if minor_units.is_nan() || minor_units <= 0.0 {
        0
    } else {
        minor_units.round() as u64
    };
    format_cents(Cents(units), locale)
}

/// Input mask for a currency field that accepts digits only.
///
/// Non-digits are ignored; the digits are read as minor units. `""` renders
/// as `R$ 0,00`, `"5"` as `R$ 0,05`, `"123456"` as `R$ 1.234,56`.
pub fn format_digits(input: &str, locale: &Locale) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let padded = format!("{digits:0>3}");
    let (int_part, dec_part) = padded.split_at(padded.len() - 2);
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    format!(
        "{} {}{}{}",
        locale.currency_symbol,
        group_thousands(int_part, locale.grouping_separator),
        locale.decimal_separator,
        dec_part,
    )
}

/// Two-decimal percentage without the sign: `20,00`.
pub fn format_percent(value: f64, locale: &Locale) -> String {
    let s = format!("{value:.2}");
    if locale.decimal_separator == '.' {
        s
    } else {
        s.replace('.', &locale.decimal_separator.to_string())
    }
}

/// Two-decimal percentage with the sign: `20,00%`.
pub fn format_percent_sign(value: f64, locale: &Locale) -> String {
    format!("{}%", format_percent(value, locale))
}

impl TargetSumWarning {
    /// User-facing prompt to fix the targets.
    pub fn message(&self, locale: &Locale) -> String {
        format!(
            "Please complete the target percentages: {}/100%.",
            format_percent_sign(self.sum, locale)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_pt_br() {
        let l = Locale::pt_br();
        assert_eq!(format_cents(Cents(0), &l), "R$ 0,00");
        assert_eq!(format_cents(Cents(5), &l), "R$ 0,05");
        assert_eq!(format_cents(Cents(123_456), &l), "R$ 1.234,56");
        assert_eq!(format_cents(Cents(100_000_000_00), &l), "R$ 100.000.000,00");
    }

    #[test]
    fn cents_en_us() {
        let l = Locale::en_us();
        assert_eq!(format_cents(Cents(123_456_789), &l), "$ 1,234,567.89");
    }

    #[test]
    fn digits_mask() {
        let l = Locale::pt_br();
        assert_eq!(format_digits("", &l), "R$ 0,00");
        assert_eq!(format_digits("5", &l), "R$ 0,05");
        assert_eq!(format_digits("50", &l), "R$ 0,50");
        assert_eq!(format_digits("500", &l), "R$ 5,00");
        assert_eq!(format_digits("000123456", &l), "R$ 1.234,56");
        assert_eq!(format_digits("R$ 1.234,5x6", &l), "R$ 1.234,56");
    }

    #[test]
    fn amount_rounds() {
        let l = Locale::pt_br();
        assert_eq!(format_amount(33_333.33, &l), "R$ 333,33");
        assert_eq!(format_amount(66.666, &l), "R$ 0,67");
        assert_eq!(format_amount(-3.0, &l), "R$ 0,00");
        assert_eq!(format_amount(f64::NAN, &l), "R$ 0,00");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(20.0, &Locale::pt_br()), "20,00");
        assert_eq!(format_percent(33.333, &Locale::en_us()), "33.33");
        assert_eq!(format_percent_sign(60.0, &Locale::pt_br()), "60,00%");
    }

    #[test]
    fn warning_message() {
        let w = TargetSumWarning { sum: 60.0 };
        assert_eq!(
            w.message(&Locale::pt_br()),
            "Please complete the target percentages: 60,00%/100%."
        );
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::from_tag("pt-BR"), Some(Locale::pt_br()));
        assert_eq!(Locale::from_tag("en_US"), Some(Locale::en_us()));
        assert_eq!(Locale::from_tag("fr-FR"), None);
        let l = Locale::en_us().with_currency_symbol("US$");
        assert_eq!(format_cents(Cents(100), &l), "US$ 1.00");
    }
}
