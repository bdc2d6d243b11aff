//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use bo_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Duplicate email, unique id or name
    #[error("{message}")]
    Conflict { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Cannot {action} a record that is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("{resource} was modified concurrently, please retry")]
    ConcurrentModification { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } | Self::ValidationErr(_) => error_codes::VALIDATION_ERROR,
            Self::Conflict { .. } => error_codes::CONFLICT,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::InvalidTransition { .. } => error_codes::INVALID_TRANSITION,
            Self::ConcurrentModification { .. } => error_codes::CONCURRENT_MODIFICATION,
            Self::Unauthorized => error_codes::UNAUTHORIZED,
            Self::Database { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                error_codes::INTERNAL_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::AccountBlocked => error_codes::ACCOUNT_BLOCKED,
                AuthError::InsufficientPermissions => error_codes::FORBIDDEN,
                AuthError::SuperadminProtected { .. } => error_codes::SUPERADMIN_PROTECTED,
                AuthError::LoginLocked { .. } => error_codes::LOGIN_LOCKED,
                AuthError::SessionInvalid => error_codes::UNAUTHORIZED,
            },
            Self::Token(err) => match err {
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                TokenError::TokenGenerationFailed => error_codes::INTERNAL_ERROR,
                _ => error_codes::TOKEN_INVALID,
            },
        }
    }

    /// Whether the message is safe to show to API clients as-is
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database { .. }
                | Self::Storage { .. }
                | Self::Internal { .. }
                | Self::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
