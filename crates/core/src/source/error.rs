//! Entry line source error types.

use thiserror::Error;

/// Errors raised by an [`EntryLineSource`](super::EntryLineSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backing storage could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl SourceError {
    /// Returns the error code for reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }
}
