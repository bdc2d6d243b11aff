//! Admin login, session checks and password setup

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use bo_shared::utils::{mask_email, normalize_email};

use crate::domain::entities::admin::Admin;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::AdminRepository;
use crate::services::token::{password_fingerprint, TokenService};

use super::password::{hash_password, validate_password, verify_password, PasswordHasher};
use super::rate_limiter::LoginRateLimiter;

/// Successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Seconds until the session expires
    pub expires_in: i64,
    pub admin: Admin,
}

/// Authentication service for admin sessions
pub struct AuthService {
    admins: Arc<dyn AdminRepository>,
    tokens: Arc<TokenService>,
    hasher: Arc<dyn PasswordHasher>,
    limiter: Arc<dyn LoginRateLimiter>,
    /// Checked against when there is no stored hash, so every failed login
    /// costs one verification
    decoy_hash: OnceCell<String>,
}

const DECOY_PASSWORD: &str = "no-such-account-password";

impl AuthService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        limiter: Arc<dyn LoginRateLimiter>,
    ) -> Self {
        Self {
            admins,
            tokens,
            hasher,
            limiter,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Log an admin in with email and password.
    ///
    /// Unknown email, wrong password and an admin who never set a password all
    /// fail with the same `InvalidCredentials`. A blocked account is only
    /// reported once the password has been verified.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let key = normalize_email(email);

        if let Some(retry_after_secs) = self.limiter.check(&key).await? {
            warn!(email = %mask_email(&key), retry_after_secs, "Login attempt while locked");
            return Err(AuthError::LoginLocked { retry_after_secs }.into());
        }

        let admin = self.admins.find_by_email(&key).await?;
        let verified = match admin.as_ref().and_then(|a| a.password_hash.as_deref()) {
            Some(hash) => verify_password(&self.hasher, password, hash).await?,
            None => {
                let decoy = self.decoy_hash().await?;
                verify_password(&self.hasher, password, decoy).await?;
                false
            }
        };

        let admin = match admin {
            Some(admin) if verified => admin,
            _ => {
                if let Some(lock_secs) = self.limiter.record_failure(&key).await? {
                    warn!(email = %mask_email(&key), lock_secs, "Login locked after repeated failures");
                }
                info!(email = %mask_email(&key), "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if admin.is_blocked {
            warn!(admin_id = %admin.id, "Blocked admin attempted login");
            return Err(AuthError::AccountBlocked.into());
        }

        self.limiter.reset(&key).await?;
        let session = self.tokens.issue_session(&admin)?;
        info!(admin_id = %admin.id, role = %admin.role, "Admin logged in");

        Ok(AuthResponse {
            token: session.token,
            expires_in: session.expires_in,
            admin,
        })
    }

    async fn decoy_hash(&self) -> DomainResult<&str> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| hash_password(&self.hasher, DECOY_PASSWORD))
            .await?;
        Ok(hash.as_str())
    }

    /// Resolve a session token to the current admin.
    ///
    /// The admin is re-read on every call so blocking or deleting an account
    /// takes effect on its next request.
    pub async fn check_auth(&self, token: Option<&str>) -> DomainResult<Admin> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::Unauthorized)?;

        let claims = self.tokens.verify_session(token)?;
        let admin_id = claims
            .admin_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::SessionInvalid))?;

        if admin.is_blocked {
            return Err(AuthError::AccountBlocked.into());
        }
        Ok(admin)
    }

    /// Set a password through a single-use setup token
    pub async fn set_password(&self, token: &str, password: &str) -> DomainResult<Admin> {
        validate_password(password)?;

        let claims = self.tokens.verify_password_setup(token)?;
        let admin_id = claims
            .admin_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::SessionInvalid))?;

        if admin.is_blocked {
            return Err(AuthError::AccountBlocked.into());
        }

        let current = admin.password_hash.as_deref();
        if claims.pwd.as_deref() != Some(password_fingerprint(current).as_str()) {
            return Err(TokenError::TokenConsumed.into());
        }

        let new_hash = hash_password(&self.hasher, password).await?;
        if !self
            .admins
            .replace_password(admin.id, current, &new_hash)
            .await?
        {
            // Another request used the same link first
            return Err(TokenError::TokenConsumed.into());
        }

        info!(admin_id = %admin.id, "Admin password set");
        Ok(Admin {
            password_hash: Some(new_hash),
            ..admin
        })
    }
}
