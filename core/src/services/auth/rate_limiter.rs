//! Failed-login lockout

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use bo_shared::LoginLockConfig;

use crate::errors::DomainError;

/// Tracks failed logins per key (normalized email)
#[async_trait]
pub trait LoginRateLimiter: Send + Sync {
    /// Seconds left on an active lock, if any
    async fn check(&self, key: &str) -> Result<Option<u64>, DomainError>;

    /// Count a failure. Returns the lock duration when this failure locks the key.
    async fn record_failure(&self, key: &str) -> Result<Option<u64>, DomainError>;

    /// Forget failures after a successful login
    async fn reset(&self, key: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy)]
struct Attempts {
    failures: u32,
    window_start: Instant,
    locked_until: Option<Instant>,
}

/// Process-local limiter used when no Redis is configured
pub struct InMemoryLoginRateLimiter {
    config: LoginLockConfig,
    attempts: Mutex<HashMap<String, Attempts>>,
}

impl InMemoryLoginRateLimiter {
    pub fn new(config: LoginLockConfig) -> Self {
        Self {
            config,
            attempts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl LoginRateLimiter for InMemoryLoginRateLimiter {
    async fn check(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let now = Instant::now();
        let attempts = self.attempts.lock().await;
        Ok(attempts
            .get(key)
            .and_then(|a| a.locked_until)
            .filter(|until| *until > now)
            .map(|until| until.duration_since(now).as_secs().max(1)))
    }

    async fn record_failure(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);
        let mut attempts = self.attempts.lock().await;

        let entry = attempts.entry(key.to_string()).or_insert(Attempts {
            failures: 0,
            window_start: now,
            locked_until: None,
        });
        if now.duration_since(entry.window_start) > window {
            *entry = Attempts {
                failures: 0,
                window_start: now,
                locked_until: None,
            };
        }

        entry.failures += 1;
        if entry.failures >= self.config.max_failures {
            entry.locked_until = Some(now + Duration::from_secs(self.config.lock_seconds));
            entry.failures = 0;
            entry.window_start = now;
            return Ok(Some(self.config.lock_seconds));
        }
        Ok(None)
    }

    async fn reset(&self, key: &str) -> Result<(), DomainError> {
        self.attempts.lock().await.remove(key);
        Ok(())
    }
}
