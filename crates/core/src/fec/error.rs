//! FEC error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures that prevent reading a FEC file at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FecError {
    /// The input holds no text.
    #[error("FEC file is empty")]
    Empty,

    /// The first line is not a FEC header.
    #[error("FEC header not found: first line must start with JournalCode")]
    MissingHeader,

    /// The input is not valid in the requested encoding.
    #[error("FEC file is not valid {0}")]
    InvalidEncoding(&'static str),
}

impl FecError {
    /// Returns the error code for reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "FEC_EMPTY",
            Self::MissingHeader => "FEC_MISSING_HEADER",
            Self::InvalidEncoding(_) => "FEC_INVALID_ENCODING",
        }
    }
}

/// Why a FEC row was left out of an import.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowRejection {
    /// `EcritureDate` is not eight digits naming a real day.
    #[error("invalid EcritureDate {0:?}")]
    InvalidDate(String),

    /// `CompteNum` is blank.
    #[error("missing CompteNum")]
    MissingAccount,

    /// `Debit` or `Credit` is not a number.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// Both `Debit` and `Credit` are nonzero.
    #[error("both Debit and Credit are set")]
    BothSides,
}

/// A FEC row excluded from an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedRow {
    /// One-based line number in the file (the header is line 1).
    pub line_number: usize,
    /// Reason for the rejection.
    pub reason: RowRejection,
    /// Row text as read.
    pub content: String,
}

impl fmt::Display for MalformedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.reason)
    }
}
