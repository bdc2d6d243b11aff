//! Infrastructure implementations of core service seams

pub mod auth;

pub use auth::RedisLoginRateLimiter;
