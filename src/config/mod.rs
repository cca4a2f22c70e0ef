//! Application configuration.
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `GYMDESK` prefix
//! and nest with double underscores.
//!
//! # Example
//!
//! ```no_run
//! use gymdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod gym;
mod notifier;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use gym::GymConfig;
pub use notifier::NotifierConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Gym-specific settings (timezone, receipts, sweep windows)
    #[serde(default)]
    pub gym: GymConfig,

    /// Outbound notification settings
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads variables with the `GYMDESK`
    /// prefix, `__` separating nested values:
    ///
    /// - `GYMDESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GYMDESK__DATABASE__URL=...` -> `database.url = ...`
    /// - `GYMDESK__GYM__RECEIPT_PREFIX=GYM` -> `gym.receipt_prefix = "GYM"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYMDESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.gym.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/gymdesk".to_string(),
                ..DatabaseConfig::default()
            },
            gym: GymConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }

    #[test]
    fn minimal_config_validates() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn bad_database_url_fails_validation() {
        let mut config = minimal();
        config.database.url = "mysql://nope".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_timezone_offset_fails_validation() {
        let mut config = minimal();
        config.gym.timezone_minutes_east = 100_000;
        assert!(config.validate().is_err());
    }
}
