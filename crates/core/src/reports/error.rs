//! Report error types.

use compta_shared::AppError;
use thiserror::Error;

use crate::fec::FecError;
use crate::source::SourceError;

/// Errors that can occur while answering a report query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The entry line source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A FEC file could not be read.
    #[error(transparent)]
    Fec(#[from] FecError),
}

impl ReportError {
    /// Returns the error code for reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Source(err) => err.error_code(),
            Self::Fec(err) => err.error_code(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Source(SourceError::StorageUnavailable(message)) => {
                Self::StorageUnavailable(message)
            }
            ReportError::Fec(err) => Self::Import(err.to_string()),
        }
    }
}
