//! Token service module for JWT management
//!
//! - HS256 session tokens carried in the session cookie
//! - Password setup tokens bound to the current password hash

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{password_fingerprint, SessionToken, TokenService};
