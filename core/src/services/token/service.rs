//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::entities::admin::Admin;
use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// A signed session token and its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    /// Seconds until expiry
    pub expires_in: i64,
}

/// Signs and verifies admin session and password setup tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn session_expiry_seconds(&self) -> i64 {
        self.config.session_expiry_seconds
    }

    /// Issue a session token for a logged-in admin
    pub fn issue_session(&self, admin: &Admin) -> Result<SessionToken, DomainError> {
        let claims = Claims::new_session(
            admin.id,
            admin.role.as_str(),
            self.config.session_expiry_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        let token = self.sign(&claims)?;
        Ok(SessionToken {
            token,
            expires_in: self.config.session_expiry_seconds,
        })
    }

    /// Issue a single-use password setup token.
    ///
    /// The token embeds a fingerprint of the admin's current password hash,
    /// so it stops verifying as soon as any password is set.
    pub fn issue_password_setup(&self, admin: &Admin) -> Result<String, DomainError> {
        let claims = Claims::new_password_setup(
            admin.id,
            password_fingerprint(admin.password_hash.as_deref()),
            self.config.setup_token_expiry_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        self.sign(&claims)
    }

    /// Verify a session token
    pub fn verify_session(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenPurpose::Session)
    }

    /// Verify a password setup token's signature, expiry and purpose.
    /// The fingerprint is checked by the caller against the stored hash.
    pub fn verify_password_setup(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenPurpose::PasswordSetup)
    }

    fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                    ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                    ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::ImmatureSignature
                    | ErrorKind::MissingRequiredClaim(_) => {
                        DomainError::Token(TokenError::InvalidClaims)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        if token_data.claims.purpose != purpose {
            return Err(DomainError::Token(TokenError::WrongPurpose));
        }
        Ok(token_data.claims)
    }
}

/// Hex SHA-256 of a password hash, or of the empty string when unset
pub fn password_fingerprint(password_hash: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password_hash.unwrap_or_default().as_bytes());
    hex::encode(hasher.finalize())
}
