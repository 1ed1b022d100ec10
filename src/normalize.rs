//! Value normalization between locale-formatted text and `Decimal`.
//!
//! Input text follows the Danish convention the calculator was built for:
//! `.` groups thousands and `,` separates decimals (`1.234.567,89`).
//! Every function here is total; malformed text never produces an error.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::config::CURRENCY_CODE;
use crate::i18n::{CurrencyFormatter, ZakatLocale};

const DECIMAL_SEPARATOR: char = ',';
const GROUP_SEPARATOR: char = '.';
/// Digits that always fit in a `Decimal` (its maximum has 29).
const MAX_DIGITS: usize = 28;

fn keep_amount_chars(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == DECIMAL_SEPARATOR || *c == '-')
        .collect()
}

/// Parses locale-formatted text into a non-negative amount.
///
/// Everything except digits, `,` and `-` is dropped (so `.` thousand
/// separators vanish), then the longest leading `[-]digits[,digits]` prefix
/// is read. Empty, malformed and negative input all yield zero; amounts
/// beyond the `Decimal` range saturate at `Decimal::MAX`.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = keep_amount_chars(raw);
    let mut chars = cleaned.chars().peekable();

    let negative = chars.next_if_eq(&'-').is_some();
    let mut integer = String::new();
    while let Some(d) = chars.next_if(char::is_ascii_digit) {
        integer.push(d);
    }
    let mut fraction = String::new();
    if chars.next_if_eq(&DECIMAL_SEPARATOR).is_some() {
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            fraction.push(d);
        }
    }

    if negative || (integer.is_empty() && fraction.is_empty()) {
        return Decimal::ZERO;
    }
    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };

    let canonical = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };
    match Decimal::from_str(&canonical) {
        Ok(amount) => amount,
        // Too many digits for `Decimal`: saturate rather than lose the magnitude.
        Err(_) if integer.len() > MAX_DIGITS => Decimal::MAX,
        Err(_) => {
            let keep = MAX_DIGITS - integer.len();
            let truncated = format!("{}.{}", integer, &fraction[..fraction.len().min(keep)]);
            Decimal::from_str(truncated.trim_end_matches('.')).unwrap_or(Decimal::MAX)
        }
    }
}

/// Re-formats text as the user types: thousand separators are re-inserted
/// into the integer part, and a decimal separator with whatever follows it
/// is kept verbatim (`"1234,"` becomes `"1.234,"`).
pub fn format_input(raw: &str) -> String {
    let cleaned = keep_amount_chars(raw);
    let mut parts = cleaned.split(DECIMAL_SEPARATOR);
    let integer = group_thousands(parts.next().unwrap_or_default());
    match parts.next() {
        Some(decimals) => format!("{}{}{}", integer, DECIMAL_SEPARATOR, decimals),
        None => integer,
    }
}

/// Renders an amount as input text, e.g. `1234.5` as `"1.234,5"`.
pub fn amount_to_input(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let plain = normalized.abs().to_string();
    let localized = plain.replacen('.', &DECIMAL_SEPARATOR.to_string(), 1);
    let formatted = format_input(&localized);
    if normalized.is_sign_negative() && !normalized.is_zero() {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Renders a computed amount as currency text with 2 fraction digits,
/// e.g. `1.234,56 kr.` for `da-DK`.
pub fn format_currency(amount: Decimal, locale: ZakatLocale) -> String {
    format_currency_as(amount, locale, CURRENCY_CODE)
}

/// Like [`format_currency`] for an explicit currency code.
pub fn format_currency_as(amount: Decimal, locale: ZakatLocale, currency_code: &str) -> String {
    locale.format_currency_as(
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        currency_code,
    )
}

/// Inserts a group separator every three digits, counted from the right of
/// each run of digits.
fn group_thousands(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 3);
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let run = &chars[start..i];
        for (idx, digit) in run.iter().enumerate() {
            if idx > 0 && (run.len() - idx) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(*digit);
        }
    }
    out
}
