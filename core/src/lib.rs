//! # Back-office core
//!
//! Domain layer for the back-office admin service: entities, the moderation
//! state machine, the listing query model, repository contracts with
//! in-memory implementations, and the services the HTTP layer calls.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
