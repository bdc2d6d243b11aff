//! Error types for authentication, tokens and input validation
//!
//! Messages here are the ones returned to API clients, so they never
//! carry internal detail such as hashes or SQL.

use thiserror::Error;

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, wrong password and missing password all collapse into this
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is blocked")]
    AccountBlocked,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Superadmin accounts cannot be {action}")]
    SuperadminProtected { action: String },

    #[error("Too many failed login attempts. Try again in {retry_after_secs} seconds")]
    LoginLocked { retry_after_secs: u64 },

    #[error("Session expired or invalid")]
    SessionInvalid,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token is not valid for this operation")]
    WrongPurpose,

    #[error("Token has already been used")]
    TokenConsumed,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Too long: {field} (max: {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Field cannot be changed: {field}")]
    ImmutableField { field: String },

    #[error("Unsupported file type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("File too large (max: {max_bytes} bytes)")]
    FileTooLarge { max_bytes: usize },
}

impl ValidationError {
    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::RequiredField { field }
            | Self::InvalidFormat { field }
            | Self::OutOfRange { field, .. }
            | Self::TooLong { field, .. }
            | Self::ImmutableField { field } => Some(field),
            Self::InvalidEmail => Some("email"),
            Self::UnsupportedMediaType { .. } | Self::FileTooLarge { .. } => Some("image"),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField { field: field.into() }
    }
}
