//! CORS configuration for the admin dashboard.
//!
//! The dashboard authenticates with a cookie, so credentials are always
//! allowed and origins are echoed back rather than answered with `*`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use bo_shared::CorsConfig;

/// Build the CORS middleware from configuration.
///
/// An empty origin list (or `*`) allows any origin, which is what local
/// development wants. Otherwise only the listed origins are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(config.max_age)
        .supports_credentials();

    if config.is_permissive() {
        info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
