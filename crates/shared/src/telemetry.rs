//! Tracing subscriber setup for the application boundary.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.filter` when it is set.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] when the filter directives are invalid,
/// and [`AppError::Internal`] when a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| AppError::Configuration(format!("invalid log filter: {e}")))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    installed.map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_a_configuration_error() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = LoggingConfig {
                filter: "compta=verbose".to_string(),
                json: false,
            };
            let err = init(&config).unwrap_err();
            assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        });
    }

    #[test]
    fn test_second_init_fails() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = LoggingConfig::default();
            // Another test binary may already own the global subscriber.
            let _ = init(&config);
            assert!(init(&config).is_err());
        });
    }
}
