//! Application state and factory
//!
//! [`Backends`] bundles the repository and adapter implementations, either
//! MySQL/Redis/filesystem in production or in-memory for development and
//! tests. [`AppState`] builds the core services on top of them and is
//! shared with every handler.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpRequest};
use tracing::warn;
use tracing_actix_web::TracingLogger;

use bo_core::errors::DomainError;
use bo_core::repositories::{
    AdminRepository, ContractorRepository, InMemoryAdminRepository, InMemoryContractorRepository,
    InMemoryLookupRepository, InMemoryStoreRepository, InMemoryTestimonialRepository,
    InMemoryUserRepository, LookupRepository, StoreRepository, TestimonialRepository,
    UserRepository,
};
use bo_core::services::admin::AdminService;
use bo_core::services::auth::{
    AuthService, BcryptPasswordHasher, InMemoryLoginRateLimiter, LoginRateLimiter, PasswordHasher,
};
use bo_core::services::catalog::CatalogService;
use bo_core::services::contractor::ContractorService;
use bo_core::services::notification::NotificationPublisher;
use bo_core::services::storage::{AssetStorage, InMemoryAssetStorage};
use bo_core::services::store::StoreService;
use bo_core::services::testimonial::TestimonialService;
use bo_core::services::token::{TokenService, TokenServiceConfig};
use bo_core::services::user::UserService;
use bo_shared::{AppConfig, CorsConfig, Environment, SessionConfig};

use crate::handlers::{json_config, path_config, query_config, ApiError};
use crate::middleware::{create_cors, SecurityHeaders};
use crate::routes;
use crate::routes::health::HealthCheck;

/// Storage and delivery adapters the services run on
pub struct Backends {
    pub admins: Arc<dyn AdminRepository>,
    pub users: Arc<dyn UserRepository>,
    pub contractors: Arc<dyn ContractorRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub lookups: Arc<dyn LookupRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub login_limiter: Arc<dyn LoginRateLimiter>,
    pub storage: Arc<dyn AssetStorage>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub notifier: Arc<dyn NotificationPublisher>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl Backends {
    /// Everything in process memory
    pub fn in_memory(config: &AppConfig, notifier: Arc<dyn NotificationPublisher>) -> Self {
        Self {
            admins: Arc::new(InMemoryAdminRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            contractors: Arc::new(InMemoryContractorRepository::new()),
            stores: Arc::new(InMemoryStoreRepository::new()),
            lookups: Arc::new(InMemoryLookupRepository::new()),
            testimonials: Arc::new(InMemoryTestimonialRepository::new()),
            login_limiter: Arc::new(InMemoryLoginRateLimiter::new(
                config.auth.login_lock.clone(),
            )),
            storage: Arc::new(InMemoryAssetStorage::new()),
            hasher: Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
            notifier,
            health_checks: Vec::new(),
        }
    }
}

/// Shared state handed to every handler
pub struct AppState {
    pub auth: AuthService,
    pub admins: AdminService,
    pub users: UserService,
    pub contractors: ContractorService,
    pub stores: StoreService,
    pub catalog: CatalogService,
    pub testimonials: TestimonialService,
    pub session: SessionConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    pub max_payload_size: usize,
    pub max_upload_bytes: usize,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    pub fn new(config: &AppConfig, backends: Backends) -> Self {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let max_upload_bytes = config.storage.max_upload_bytes;

        Self {
            auth: AuthService::new(
                Arc::clone(&backends.admins),
                Arc::clone(&tokens),
                Arc::clone(&backends.hasher),
                backends.login_limiter,
            ),
            admins: AdminService::new(
                backends.admins,
                tokens,
                Arc::clone(&backends.hasher),
                Arc::clone(&backends.notifier),
                config.notification.password_setup_url.clone(),
            ),
            users: UserService::new(
                backends.users,
                backends.hasher,
                Arc::clone(&backends.notifier),
            ),
            contractors: ContractorService::new(
                backends.contractors,
                Arc::clone(&backends.notifier),
            ),
            stores: StoreService::new(backends.stores, backends.notifier),
            catalog: CatalogService::new(
                backends.lookups,
                Arc::clone(&backends.storage),
                max_upload_bytes,
            ),
            testimonials: TestimonialService::new(
                backends.testimonials,
                backends.storage,
                max_upload_bytes,
            ),
            session: config.auth.session.clone(),
            cors: config.cors.clone(),
            environment: config.environment,
            max_payload_size: config.server.max_payload_size,
            max_upload_bytes,
            health_checks: backends.health_checks,
        }
    }
}

/// Create and configure the application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&state.cors);
    let security = SecurityHeaders::for_environment(state.environment);
    let max_payload_size = state.max_payload_size;

    App::new()
        .app_data(state)
        .app_data(json_config(max_payload_size))
        .app_data(query_config())
        .app_data(path_config())
        // Outermost last: tracing sees every request, CORS answers preflights
        .wrap(security)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, ApiError> {
    warn!(method = %req.method(), path = %req.path(), "No route matched");
    Err(DomainError::not_found(format!("Route {}", req.path())).into())
}
