//! Tests for the Redis login rate limiter. They need a running Redis.

use std::sync::Arc;

use bo_core::services::auth::LoginRateLimiter;
use bo_shared::LoginLockConfig;
use uuid::Uuid;

use crate::cache::RedisClient;
use crate::config::CacheConfig;
use crate::services::auth::RedisLoginRateLimiter;

async fn limiter(max_failures: u32) -> RedisLoginRateLimiter {
    let mut config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = "backoffice-test".to_string();
    let client = RedisClient::new(config).await.unwrap();

    RedisLoginRateLimiter::new(
        Arc::new(client),
        LoginLockConfig {
            max_failures,
            window_seconds: 60,
            lock_seconds: 30,
        },
    )
}

fn email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_keys_are_prefixed() {
    let limiter = limiter(3).await;
    assert_eq!(
        limiter.lock_key("a@b.com"),
        "backoffice-test:login:lock:a@b.com"
    );
    assert_eq!(
        limiter.failure_key("a@b.com"),
        "backoffice-test:login:fail:a@b.com"
    );
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_locks_after_max_failures() {
    let limiter = limiter(3).await;
    let key = email();

    assert_eq!(limiter.check(&key).await.unwrap(), None);
    assert_eq!(limiter.record_failure(&key).await.unwrap(), None);
    assert_eq!(limiter.record_failure(&key).await.unwrap(), None);
    assert_eq!(limiter.record_failure(&key).await.unwrap(), Some(30));

    let remaining = limiter.check(&key).await.unwrap().unwrap();
    assert!(remaining <= 30 && remaining >= 1);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_reset_clears_failures() {
    let limiter = limiter(2).await;
    let key = email();

    limiter.record_failure(&key).await.unwrap();
    limiter.reset(&key).await.unwrap();
    assert_eq!(limiter.record_failure(&key).await.unwrap(), None);
    assert_eq!(limiter.check(&key).await.unwrap(), None);
}
