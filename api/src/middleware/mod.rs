pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{removal_cookie, session_cookie, session_token, CurrentAdmin, SessionAuth};
pub use cors::create_cors;
pub use security::SecurityHeaders;
