//! Input boundary: turn user-typed strings into calculation inputs.
//!
//! Nothing here fails. Anything that cannot be read becomes zero, so the
//! calculator always receives well-formed numbers.

use crate::format::Locale;
use crate::targets::sanitize;
use crate::types::Cents;

/// Read every ASCII digit in `input` as a minor-unit amount.
///
/// This is the currency-mask convention: typing `1`, `2`, `3` yields
/// `Cents(123)`. Empty input or overflow yields zero.
pub fn cents_from_digits(input: &str) -> Cents {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().map(Cents).unwrap_or(Cents::ZERO)
}

/// Parse a percentage such as `"20,50"` (pt-BR) or `"20.50"` (en-US).
///
/// Grouping separators are dropped, the first decimal separator becomes the
/// decimal point, every other non-numeric character is dropped, and the
/// longest numeric prefix is read. The result is never negative; unparseable
/// input yields zero.
pub fn parse_percentage(input: &str, locale: &Locale) -> f64 {
    sanitize(leading_float(&normalize(input, locale)))
}

/// Parse a major-unit amount such as `"1.234,56"` into minor units.
///
/// Only the first two decimal digits are kept (truncation). Unparseable
/// input or overflow yields zero.
pub fn parse_amount(input: &str, locale: &Locale) -> Cents {
    let normalized = normalize(input, locale);
    let mut parts = normalized.splitn(2, '.');
    let int_digits = parts.next().unwrap_or("");
    let frac_digits: String = parts
        .next()
        .unwrap_or("")
        .chars()
        .take_while(char::is_ascii_digit)
        .take(2)
        .collect();

    let major = if int_digits.is_empty() {
        0
    } else {
        match int_digits.parse::<u64>() {
            Ok(v) => v,
            Err(_) => return Cents::ZERO,
        }
    };
    let minor = format!("{frac_digits:0<2}").parse::<u64>().unwrap_or(0);

    major
        .checked_mul(100)
        .and_then(|v| v.checked_add(minor))
        .map(Cents)
        .unwrap_or(Cents::ZERO)
}

/// Strip grouping, map the first decimal separator to `.`, keep `[0-9.]`.
fn normalize(input: &str, locale: &Locale) -> String {
    let mut seen_decimal = false;
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == locale.grouping_separator {
            continue;
        }
        if c == locale.decimal_separator && !seen_decimal {
            seen_decimal = true;
            out.push('.');
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            out.push(c);
        }
    }
    out
}

/// Read the longest `digits[.digits]` prefix; zero if there are no digits.
fn leading_float(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    let prefix = s[..end].trim_end_matches('.');
    let prefix = if prefix.starts_with('.') {
        format!("0{prefix}")
    } else {
        prefix.to_string()
    };
    prefix.parse().unwrap_or(0.0)
}
