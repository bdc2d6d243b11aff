//! Type definitions module
//!
//! - `pagination` - Page requests, page envelopes and the infinite-scroll accumulator
//! - `response` - API response wrappers and health checks

pub mod pagination;
pub mod response;

pub use pagination::{Page, Pagination, ScrollRequest, ScrollState, DEFAULT_LIMIT, MAX_LIMIT};
pub use response::{ApiResponse, HealthResponse, HealthStatus};
