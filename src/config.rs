//! Environment-driven store configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// Environment variable naming the SQLite database path.
const DB_PATH_VAR: &str = "CRICSAGA_DB";

/// Store configuration.
#[derive(Debug, Clone, Getters)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    db_path: String,
}

impl StoreConfig {
    /// Creates a configuration pointing at the given database path.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `CRICSAGA_DB`; a `.env` file is honored if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `CRICSAGA_DB` is not set.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        debug!("Loading store config from environment");
        dotenvy::dotenv().ok();

        let db_path = std::env::var(DB_PATH_VAR).map_err(|_| {
            ConfigError::new(format!("{DB_PATH_VAR} environment variable not set"))
        })?;

        info!(db_path = %db_path, "Store config loaded");
        Ok(Self { db_path })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
