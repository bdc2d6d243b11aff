//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema migrations
//! - Repository implementations for every core repository trait
//! - The shared SQL builder for paginated, searchable listings

pub mod connection;
mod list;
pub mod mysql;
mod rows;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolUsage};
pub use mysql::{
    MySqlAdminRepository, MySqlContractorRepository, MySqlLookupRepository,
    MySqlStoreRepository, MySqlTestimonialRepository, MySqlUserRepository,
};
