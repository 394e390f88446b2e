//! Server configuration, loaded from environment variables with fallback to
//! development defaults.

use std::env;

use bookpos_core::RfidConflictPolicy;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// What to do when an RFID is presented for a buyer that already carries
    /// a different tag: `reject` (default) or `overwrite`.
    pub rfid_conflict_policy: RfidConflictPolicy,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/bookpos.db".to_string());

        let rfid_conflict_policy = env::var("RFID_CONFLICT_POLICY")
            .unwrap_or_else(|_| "reject".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RFID_CONFLICT_POLICY".to_string()))?;

        Ok(ServerConfig {
            http_port,
            database_path,
            rfid_conflict_policy,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}
