//! Password hashing and policy

use std::sync::Arc;

use crate::errors::{DomainError, DomainResult, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;
/// bcrypt ignores input past 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

// Mirrors bcrypt's private cost bounds
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

/// One-way password hashing primitive
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt with a configurable cost
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(BCRYPT_MIN_COST, BCRYPT_MAX_COST),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        // A malformed stored hash can never match
        Ok(bcrypt::verify(password, hash).unwrap_or(false))
    }
}

/// Enforce the password policy
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::OutOfRange {
            field: "password".to_string(),
            min: format!("{} characters", MIN_PASSWORD_LEN),
            max: format!("{} bytes", MAX_PASSWORD_BYTES),
        });
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

/// Hash on the blocking pool; bcrypt is deliberately slow
pub async fn hash_password(hasher: &Arc<dyn PasswordHasher>, password: &str) -> DomainResult<String> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
}

/// Verify on the blocking pool
pub async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    hash: &str,
) -> DomainResult<bool> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_round_trip() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("correct horse").unwrap();
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
        assert!(!hasher.verify("correct horse", "not-a-hash").unwrap());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }
}
