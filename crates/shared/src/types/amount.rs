//! French notation for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; this module only converts them to and
//! from the comma-separated text used in French accounting files.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places used for euro amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Error returned when a French-formatted amount cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount: {input:?}")]
pub struct AmountParseError {
    /// The offending text, as found in the source.
    pub input: String,
}

/// Rounds an amount to cents (half away from zero) and fixes its scale to two.
#[must_use]
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // Avoid "-0,00".
        rounded = Decimal::ZERO;
    }
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

/// Formats an amount with exactly two decimals and a comma separator.
///
/// No thousands separator is emitted: `1234.5` becomes `"1234,50"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    to_cents(amount).to_string().replace('.', ",")
}

/// Formats an amount, rendering zero as an empty string when `blank_zero` is set.
#[must_use]
pub fn format_amount_or_blank(amount: Decimal, blank_zero: bool) -> String {
    if blank_zero && to_cents(amount).is_zero() {
        String::new()
    } else {
        format_amount(amount)
    }
}

/// Parses a French-formatted amount.
///
/// Accepts a comma or a dot as decimal separator, ignores spaces (including
/// non-breaking ones) used as thousands separators, and reads a blank field as
/// zero. When both a dot and a comma are present, dots are thousands separators.
///
/// # Errors
///
/// Returns [`AmountParseError`] when the remaining text is not a decimal number.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountParseError> {
    let compact: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '\t'))
        .collect();

    if compact.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };

    normalized.parse::<Decimal>().map_err(|_| AmountParseError {
        input: input.to_string(),
    })
}
