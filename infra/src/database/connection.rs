//! MySQL pool for the back-office repositories
//!
//! One pool is shared by every `MySql*Repository`. The schema under
//! `infra/migrations` is embedded at compile time and applied at startup.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;
use crate::InfrastructureError;

/// Connected pool plus the settings it was opened with
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Open the pool and make sure one connection can be established.
    ///
    /// # Example
    /// ```no_run
    /// use bo_infra::config::DatabaseConfig;
    /// use bo_infra::database::DatabasePool;
    ///
    /// async fn open() -> Result<DatabasePool, Box<dyn std::error::Error>> {
    ///     let db = DatabasePool::connect(DatabaseConfig::new("mysql://bo:bo@localhost/backoffice")).await?;
    ///     db.migrate().await?;
    ///     Ok(db)
    /// }
    /// ```
    pub async fn connect(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Trace)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Could not open MySQL pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            slow_query_ms = config.slow_query_threshold,
            "MySQL pool ready"
        );
        Ok(Self { pool, config })
    }

    /// Handle passed to the repositories; cloning it is cheap
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        if one != 1 {
            return Err(InfrastructureError::Config(format!(
                "unexpected ping result {}",
                one
            )));
        }
        Ok(())
    }

    pub fn usage(&self) -> PoolUsage {
        PoolUsage {
            open: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| InfrastructureError::Migration(e.to_string()))?;
        tracing::info!("Schema up to date");
        Ok(())
    }

    /// Wait for checked-out connections to return, then close them
    pub async fn close(&self) {
        tracing::info!(usage = %self.usage(), "Closing MySQL pool");
        self.pool.close().await;
    }
}

/// Snapshot of pool occupancy, logged at startup and shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub open: u32,
    pub idle: usize,
    pub max: u32,
}

impl fmt::Display for PoolUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} open of {}, {} idle", self.open, self.max, self.idle)
    }
}
