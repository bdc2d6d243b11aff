//! Authentication and session configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "backoffice-development-secret-change-me";

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session token signing
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Session cookie transport
    #[serde(default)]
    pub session: SessionConfig,

    /// Failed-login lockout
    #[serde(default)]
    pub login_lock: LoginLockConfig,

    /// Superadmin created at startup when no admin exists
    #[serde(default)]
    pub bootstrap: Option<BootstrapConfig>,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Get the JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HS256)
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_session_expiry")]
    pub session_expiry: i64,

    /// Password setup link lifetime in seconds
    #[serde(default = "default_setup_expiry")]
    pub setup_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            session_expiry: default_session_expiry(),
            setup_token_expiry: default_setup_expiry(),
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session expiry in hours
    pub fn with_session_expiry_hours(mut self, hours: i64) -> Self {
        self.session_expiry = hours * 3600;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session cookie name
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,

    /// Session cookie SameSite attribute ("Strict", "Lax" or "None")
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: false,
            same_site: default_same_site(),
        }
    }
}

/// Failed-login lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginLockConfig {
    /// Failures tolerated inside the window before locking
    #[serde(default = "default_max_failures")]
    pub max_failures: u32,

    /// Counting window in seconds
    #[serde(default = "default_window")]
    pub window_seconds: u64,

    /// Lock duration in seconds
    #[serde(default = "default_lock_duration")]
    pub lock_seconds: u64,
}

impl Default for LoginLockConfig {
    fn default() -> Self {
        Self {
            max_failures: default_max_failures(),
            window_seconds: default_window(),
            lock_seconds: default_lock_duration(),
        }
    }
}

/// Bootstrap superadmin credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapConfig {
    pub fullname: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_bootstrap_unique_id")]
    pub unique_id: String,
}

fn default_secret() -> String {
    String::from(DEFAULT_SECRET)
}

fn default_session_expiry() -> i64 {
    86400 // 1 day
}

fn default_setup_expiry() -> i64 {
    172800 // 2 days
}

fn default_issuer() -> String {
    String::from("backoffice")
}

fn default_audience() -> String {
    String::from("backoffice-dashboard")
}

fn default_cookie_name() -> String {
    String::from("admin_session")
}

fn default_same_site() -> String {
    String::from("Lax")
}

fn default_max_failures() -> u32 {
    5
}

fn default_window() -> u64 {
    900 // 15 minutes
}

fn default_lock_duration() -> u64 {
    900
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_bootstrap_unique_id() -> String {
    String::from("SUPER-001")
}
