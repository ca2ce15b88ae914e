//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or applied.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The entry line source could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A regulatory file could not be imported.
    #[error("Import error: {0}")]
    Import(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for callers that report errors by code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Import(_) => "IMPORT_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::StorageUnavailable(String::new()).error_code(),
            "STORAGE_UNAVAILABLE"
        );
        assert_eq!(AppError::Import(String::new()).error_code(), "IMPORT_ERROR");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::StorageUnavailable("offline".into()).is_retryable());
        assert!(!AppError::Import("bad".into()).is_retryable());
        assert!(!AppError::Configuration("bad".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::StorageUnavailable("msg".into()).to_string(),
            "Storage unavailable: msg"
        );
        assert_eq!(
            AppError::Import("msg".into()).to_string(),
            "Import error: msg"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = config::ConfigError::NotFound("fec".into()).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
