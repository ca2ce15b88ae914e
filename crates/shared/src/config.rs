//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// FEC export/import configuration.
    pub fec: FecConfig,
    /// Report query configuration.
    pub reports: ReportsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// FEC export/import configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FecConfig {
    /// Render zero amounts as an empty field instead of `0,00`.
    pub emit_zero_as_blank: bool,
    /// Emit the 22-column layout instead of the 18-column one.
    pub extended_layout: bool,
    /// Read imported files as Windows-1252 rather than UTF-8.
    pub legacy_encoding: bool,
}

impl Default for FecConfig {
    fn default() -> Self {
        Self {
            emit_zero_as_blank: false,
            extended_layout: false,
            legacy_encoding: true,
        }
    }
}

/// Report query configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Maximum number of cached query results.
    pub cache_capacity: u64,
    /// Time-to-live of a cached query result, in seconds.
    pub cache_ttl_secs: u64,
    /// Largest debit/credit gap tolerated on a voucher before it is reported.
    pub voucher_tolerance: Decimal,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
            voucher_tolerance: Decimal::new(1, 2),
        }
    }
}

fn default_cache_capacity() -> u64 {
    100
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directives used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "compta=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `COMPTA__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("COMPTA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
