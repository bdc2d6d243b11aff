use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use bo_api::routes::health::HealthCheck;
use bo_api::{create_app, telemetry, AppState, Backends};
use bo_core::services::notification::{
    NotificationPublisher, NotificationWorker, Outbox, RetryPolicy,
};
use bo_infra::cache::RedisClient;
use bo_infra::database::{
    DatabasePool, MySqlAdminRepository, MySqlContractorRepository, MySqlLookupRepository,
    MySqlStoreRepository, MySqlTestimonialRepository, MySqlUserRepository,
};
use bo_infra::email::create_email_sender;
use bo_infra::services::RedisLoginRateLimiter;
use bo_infra::storage::LocalAssetStorage;
use bo_shared::AppConfig;

const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(
        environment = ?config.environment,
        bind = %config.server.bind_address(),
        "Starting back-office API"
    );

    let (outbox, receiver) = Outbox::channel(config.notification.outbox_capacity);
    let sender = create_email_sender(&config.notification)
        .context("failed to configure the email sender")?;
    let worker = tokio::spawn(
        NotificationWorker::new(receiver, sender, RetryPolicy::from_config(&config.notification))
            .run(),
    );

    let (backends, pool) = build_backends(&config, Arc::new(outbox)).await?;
    let state = web::Data::new(AppState::new(&config, backends));

    if let Some(bootstrap) = &config.auth.bootstrap {
        if let Some(admin) = state
            .admins
            .bootstrap(bootstrap)
            .await
            .context("failed to bootstrap the first superadmin")?
        {
            info!(admin_id = %admin.id, "Created bootstrap superadmin");
        }
    }

    let server_state = state.clone();
    let mut server = HttpServer::new(move || create_app(server_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    info!("Server stopped, draining notification outbox");
    // The outbox closes once the last service holding it is dropped
    drop(state);
    if tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await.is_err() {
        warn!("Notification worker did not drain in time");
    }
    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}

/// MySQL when a database is configured, Redis for the login limiter when a
/// cache is configured, in-memory for whatever is not
async fn build_backends(
    config: &AppConfig,
    notifier: Arc<dyn NotificationPublisher>,
) -> anyhow::Result<(Backends, Option<Arc<DatabasePool>>)> {
    let mut backends = Backends::in_memory(config, notifier);
    backends.storage = Arc::new(LocalAssetStorage::new(&config.storage));

    let pool = match &config.database {
        Some(database) => {
            let pool = Arc::new(
                DatabasePool::connect(database.clone())
                    .await
                    .context("failed to connect to MySQL")?,
            );
            pool.migrate()
                .await
                .context("failed to run database migrations")?;

            let conn = pool.pool().clone();
            backends.admins = Arc::new(MySqlAdminRepository::new(conn.clone()));
            backends.users = Arc::new(MySqlUserRepository::new(conn.clone()));
            backends.contractors = Arc::new(MySqlContractorRepository::new(conn.clone()));
            backends.stores = Arc::new(MySqlStoreRepository::new(conn.clone()));
            backends.lookups = Arc::new(MySqlLookupRepository::new(conn.clone()));
            backends.testimonials = Arc::new(MySqlTestimonialRepository::new(conn));

            info!(usage = %pool.usage(), "Using MySQL repositories");
            backends.health_checks.push(pool.clone() as Arc<dyn HealthCheck>);
            Some(pool)
        }
        None => {
            warn!("No database configured, records are kept in memory");
            None
        }
    };

    if let Some(cache) = &config.cache {
        let redis = Arc::new(
            RedisClient::new(cache.clone())
                .await
                .context("failed to connect to Redis")?,
        );
        backends.login_limiter = Arc::new(RedisLoginRateLimiter::new(
            Arc::clone(&redis),
            config.auth.login_lock.clone(),
        ));
        backends.health_checks.push(redis as Arc<dyn HealthCheck>);
        info!("Using Redis for login lockout");
    }

    Ok((backends, pool))
}
