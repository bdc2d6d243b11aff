//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_invalid_transition_message() {
    let error = DomainError::InvalidTransition {
        from: "Approved".to_string(),
        action: "reject".to_string(),
    };
    assert_eq!(error.to_string(), "Cannot reject a record that is Approved");
    assert_eq!(error.error_code(), "INVALID_TRANSITION");
}

#[test]
fn test_auth_error_codes() {
    let locked: DomainError = AuthError::LoginLocked { retry_after_secs: 60 }.into();
    assert_eq!(locked.error_code(), "LOGIN_LOCKED");
    assert!(locked.to_string().contains("60 seconds"));

    let protected: DomainError = AuthError::SuperadminProtected {
        action: "deleted".to_string(),
    }
    .into();
    assert_eq!(protected.error_code(), "SUPERADMIN_PROTECTED");
    assert_eq!(protected.to_string(), "Superadmin accounts cannot be deleted");
}

#[test]
fn test_token_error_codes() {
    let expired: DomainError = TokenError::TokenExpired.into();
    assert_eq!(expired.error_code(), "TOKEN_EXPIRED");

    let consumed: DomainError = TokenError::TokenConsumed.into();
    assert_eq!(consumed.error_code(), "TOKEN_INVALID");
}

#[test]
fn test_validation_error_field() {
    let error = ValidationError::OutOfRange {
        field: "rating".to_string(),
        min: "1".to_string(),
        max: "5".to_string(),
    };
    assert_eq!(error.field(), Some("rating"));
    assert_eq!(ValidationError::InvalidEmail.field(), Some("email"));
}

#[test]
fn test_internal_errors_are_flagged() {
    assert!(DomainError::Database {
        message: "connection reset".to_string()
    }
    .is_internal());
    assert!(!DomainError::not_found("Store").is_internal());
    assert_eq!(DomainError::not_found("Store").to_string(), "Store not found");
}
