//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `STUDENT_PORTAL` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use student_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod redis;
mod server;
mod session;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::{SessionBackend, SessionConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Only needed for the redis session backend
    #[serde(default)]
    pub redis: Option<RedisConfig>,

    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `STUDENT_PORTAL` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// - `STUDENT_PORTAL__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `STUDENT_PORTAL__SESSION__BACKEND=redis` -> `session.backend = redis`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STUDENT_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.session.validate(self.is_production())?;

        match (&self.session.backend, &self.redis) {
            (SessionBackend::Redis, None) => {
                return Err(ValidationError::RedisRequiredForSessions)
            }
            (_, Some(redis)) => redis.validate()?,
            (SessionBackend::Memory, None) => {}
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
