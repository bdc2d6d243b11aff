//! Token claims for admin sessions and password setup links.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a signed token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Dashboard session carried in the session cookie
    Session,
    /// One-shot link for choosing a password
    PasswordSetup,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    pub iss: String,

    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    pub purpose: TokenPurpose,

    /// Admin role at issue time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Fingerprint of the password hash a setup token was issued against.
    /// Changing the password invalidates the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>,
}

impl Claims {
    fn new(
        admin_id: Uuid,
        purpose: TokenPurpose,
        ttl_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            purpose,
            role: None,
            pwd: None,
        }
    }

    /// Claims for a dashboard session
    pub fn new_session(
        admin_id: Uuid,
        role: &str,
        ttl_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let mut claims = Self::new(admin_id, TokenPurpose::Session, ttl_seconds, issuer, audience);
        claims.role = Some(role.to_string());
        claims
    }

    /// Claims for a password setup link
    pub fn new_password_setup(
        admin_id: Uuid,
        password_fingerprint: String,
        ttl_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let mut claims = Self::new(
            admin_id,
            TokenPurpose::PasswordSetup,
            ttl_seconds,
            issuer,
            audience,
        );
        claims.pwd = Some(password_fingerprint);
        claims
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the admin ID from the claims
    pub fn admin_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Seconds until expiry, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}
