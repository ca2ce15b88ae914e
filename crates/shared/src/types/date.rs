//! Compact `YYYYMMDD` dates as written in regulatory files.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while reading a compact date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompactDateError {
    /// The field is not made of exactly eight ASCII digits.
    #[error("Date must be exactly 8 digits (YYYYMMDD), got {0:?}")]
    NotEightDigits(String),

    /// Eight digits that do not name a calendar day (e.g. `20240230`).
    #[error("Date {0} does not exist in the calendar")]
    OutOfCalendar(String),
}

/// Formats a date as `YYYYMMDD` (the ISO date without dashes).
#[must_use]
pub fn format_compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parses a `YYYYMMDD` date.
///
/// Surrounding whitespace is tolerated; anything else than eight digits is not.
///
/// # Errors
///
/// Returns [`CompactDateError`] for malformed or impossible dates.
pub fn parse_compact_date(input: &str) -> Result<NaiveDate, CompactDateError> {
    let trimmed = input.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompactDateError::NotEightDigits(input.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .map_err(|_| CompactDateError::OutOfCalendar(trimmed.to_string()))
}
