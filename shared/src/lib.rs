//! Shared utilities and common types for the back-office server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - The JSON error envelope
//! - Pagination, listing and infinite-scroll types
//! - Validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BootstrapConfig, CacheConfig, ConfigError, CorsConfig, DatabaseConfig,
    EmailProvider, Environment, JwtConfig, LogFormat, LoggingConfig, LoginLockConfig,
    NotificationConfig, ServerConfig, SessionConfig, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{
    ApiResponse, HealthResponse, HealthStatus, Page, Pagination, ScrollRequest, ScrollState,
};
pub use utils::validation;
