//! # Back-office HTTP API
//!
//! actix-web application serving the admin dashboard: session auth, admin
//! and user management, contractor/store moderation, the job type, product
//! type and testimonial catalogs, and a health probe.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState, Backends};
