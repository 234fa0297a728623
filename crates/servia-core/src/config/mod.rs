//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod logging;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Session lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SERVIA__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SERVIA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::misconfigured(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::misconfigured(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no deployment should run with.
    fn validate(&self) -> Result<(), AppError> {
        if self.session.token_bytes < session::MIN_TOKEN_BYTES {
            return Err(AppError::misconfigured(format!(
                "session.token_bytes must be at least {}, got {}",
                session::MIN_TOKEN_BYTES,
                self.session.token_bytes
            )));
        }
        if self.session.ttl_hours == 0 {
            return Err(AppError::misconfigured(
                "session.ttl_hours must be at least 1",
            ));
        }
        Ok(())
    }
}
