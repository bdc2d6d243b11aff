//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session tokens, cookies, password hashing and login lockout
//! - `cache` - Redis configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `notification` - Email delivery and the notification outbox
//! - `server` - HTTP server and CORS configuration
//! - `storage` - Uploaded image storage

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod notification;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, BootstrapConfig, JwtConfig, LoginLockConfig, SessionConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{EmailProvider, NotificationConfig};
pub use server::{CorsConfig, ServerConfig};
pub use storage::StorageConfig;

/// Prefix for environment variable overrides, e.g. `BACKOFFICE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "BACKOFFICE";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; the in-memory store is used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Redis configuration; the in-memory login limiter is used when absent
    #[serde(default)]
    pub cache: Option<CacheConfig>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Notification configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Image storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            cache: None,
            auth: AuthConfig::default(),
            notification: NotificationConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the layered sources
    ///
    /// Sources in increasing priority:
    /// 1. Built-in defaults
    /// 2. `config/<environment>.toml` (optional)
    /// 3. `BACKOFFICE__*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();

        let defaults = config::Config::try_from(&Self::for_environment(environment))
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::with_name(&format!("config/{}", environment))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults tuned for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        };
        if environment.is_production() {
            config.auth.session.secure = true;
            config.notification.provider = EmailProvider::Http;
        }
        config
    }

    /// Reject configurations that cannot run safely
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "auth.jwt.secret must be set in production".to_string(),
            ));
        }
        if self.auth.jwt.secret.len() < 16 {
            return Err(ConfigError::Invalid(
                "auth.jwt.secret must be at least 16 characters".to_string(),
            ));
        }
        if self.notification.provider == EmailProvider::Http && self.notification.api_url.is_none() {
            return Err(ConfigError::Invalid(
                "notification.api_url is required for the http provider".to_string(),
            ));
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "storage.max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loading or validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
