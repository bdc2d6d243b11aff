//! Admin authentication
//!
//! - Email/password login with failed-attempt lockout
//! - Session token verification
//! - Single-use password setup links

mod password;
mod rate_limiter;
mod service;

#[cfg(test)]
mod tests;

pub use password::{
    hash_password, validate_password, verify_password, BcryptPasswordHasher, PasswordHasher,
    MAX_PASSWORD_BYTES, MIN_PASSWORD_LEN,
};
pub use rate_limiter::{InMemoryLoginRateLimiter, LoginRateLimiter};
pub use service::{AuthResponse, AuthService};
