//! `GET /health`: liveness plus a probe per configured backend

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use tracing::warn;

use bo_infra::cache::RedisClient;
use bo_infra::database::DatabasePool;
use bo_shared::{HealthResponse, HealthStatus};

use crate::app::AppState;

/// A backend the health endpoint probes
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> HealthStatus;
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                HealthStatus::Unhealthy
            }
        }
    }
}

#[async_trait]
impl HealthCheck for RedisClient {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.health_check().await {
            Ok(true) => HealthStatus::Healthy,
            Ok(false) => HealthStatus::Degraded,
            Err(e) => {
                warn!(error = %e, "Cache health check failed");
                HealthStatus::Unhealthy
            }
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

/// 200 when every backend answers, 503 otherwise
async fn health(state: web::Data<AppState>) -> HttpResponse {
    let mut services = HashMap::new();
    for check in &state.health_checks {
        services.insert(check.name().to_string(), check.check().await);
    }

    let report = HealthResponse::from_checks(services, env!("CARGO_PKG_VERSION"));
    if report.status == HealthStatus::Healthy {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
