//! # Infrastructure Layer
//!
//! Concrete implementations of the contracts defined in `bo_core`:
//!
//! - **Database**: MySQL repositories using SQLx, with conditional updates
//!   for every moderation and block toggle
//! - **Cache**: Redis client and the Redis-backed login rate limiter
//! - **Email**: HTTP email API and log-only senders
//! - **Storage**: image assets on the local filesystem
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis support (default)

use bo_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and operations
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Email transports for the notification worker
pub mod email;

/// Services module - Infrastructure service implementations
#[cfg(feature = "redis-cache")]
pub mod services;

/// Local filesystem asset storage
pub mod storage;

/// Configuration re-exported from the shared crate
pub mod config {
    pub use bo_shared::config::{CacheConfig, DatabaseConfig, NotificationConfig, StorageConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            #[cfg(feature = "mysql")]
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            InfrastructureError::Io(e) => DomainError::Storage {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
