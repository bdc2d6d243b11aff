//! Redis-backed login lockout
//!
//! Keys, under the configured prefix:
//! - `login:fail:{email}` counts failures; it expires one window after the first failure
//! - `login:lock:{email}` exists while the account is locked; its TTL is the time left

use async_trait::async_trait;
use std::sync::Arc;

use bo_core::errors::DomainError;
use bo_core::services::auth::LoginRateLimiter;
use bo_shared::LoginLockConfig;

use crate::cache::redis_client::RedisClient;

/// Login rate limiter shared by every API instance through Redis
pub struct RedisLoginRateLimiter {
    redis_client: Arc<RedisClient>,
    config: LoginLockConfig,
}

impl RedisLoginRateLimiter {
    pub fn new(redis_client: Arc<RedisClient>, config: LoginLockConfig) -> Self {
        Self {
            redis_client,
            config,
        }
    }

    pub(crate) fn failure_key(&self, key: &str) -> String {
        self.redis_client.config().key(&["login", "fail", key])
    }

    pub(crate) fn lock_key(&self, key: &str) -> String {
        self.redis_client.config().key(&["login", "lock", key])
    }
}

#[async_trait]
impl LoginRateLimiter for RedisLoginRateLimiter {
    async fn check(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let remaining = self.redis_client.ttl(&self.lock_key(key)).await?;
        Ok(remaining.map(|secs| secs.max(1)))
    }

    async fn record_failure(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let failures = self
            .redis_client
            .increment(&self.failure_key(key), Some(self.config.window_seconds))
            .await?;

        if failures < i64::from(self.config.max_failures) {
            return Ok(None);
        }

        self.redis_client
            .set_with_expiry(&self.lock_key(key), "locked", self.config.lock_seconds)
            .await?;
        self.redis_client.delete(&self.failure_key(key)).await?;

        tracing::warn!(
            failures,
            lock_seconds = self.config.lock_seconds,
            "Login locked after repeated failures"
        );
        Ok(Some(self.config.lock_seconds))
    }

    async fn reset(&self, key: &str) -> Result<(), DomainError> {
        self.redis_client.delete(&self.failure_key(key)).await?;
        Ok(())
    }
}
