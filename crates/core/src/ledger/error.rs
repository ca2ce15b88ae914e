//! Ledger error types for normalization of source records.

use thiserror::Error;

/// Reasons a source record cannot become a canonical ledger value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// A required field is absent under every known spelling.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The account number is blank.
    #[error("Entry line has no account number")]
    MissingAccount,

    /// An amount is negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(&'static str),

    /// Both debit and credit are nonzero on the same line.
    #[error("Entry line must carry either a debit or a credit, not both")]
    BothSides,

    /// An exercise ends before it starts.
    #[error("Exercise ends before it starts")]
    InvertedExercise,
}

impl LineError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::MissingAccount => "MISSING_ACCOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::BothSides => "BOTH_SIDES",
            Self::InvertedExercise => "INVERTED_EXERCISE",
        }
    }
}
