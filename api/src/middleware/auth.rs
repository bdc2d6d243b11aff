//! Session authentication for admin routes.
//!
//! The session token travels in an HTTP-only cookie; a `Bearer`
//! Authorization header is accepted as well. [`SessionAuth`] resolves the
//! token to the current admin on every request and stores it in the request
//! extensions, where handlers pick it up through [`CurrentAdmin`].

use std::future::{ready, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use bo_core::domain::entities::admin::Admin;
use bo_core::errors::DomainError;
use bo_shared::SessionConfig;

use crate::app::AppState;
use crate::handlers::ApiError;

/// The authenticated admin behind the current request
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

impl CurrentAdmin {
    pub fn into_inner(self) -> Admin {
        self.0
    }
}

impl std::ops::Deref for CurrentAdmin {
    type Target = Admin;

    fn deref(&self) -> &Admin {
        &self.0
    }
}

impl FromRequest for CurrentAdmin {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized).into());

        ready(result)
    }
}

/// Middleware factory guarding a scope behind a valid admin session
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    ApiError::from(DomainError::internal("application state is not registered"))
                })?;

            let token = session_token(req.request(), &state.session.cookie_name);
            let admin = state
                .auth
                .check_auth(token.as_deref())
                .await
                .map_err(|err| {
                    debug!(path = %req.path(), error = %err, "Session rejected");
                    ApiError::from(err)
                })?;

            req.extensions_mut().insert(CurrentAdmin(admin));
            service.call(req).await
        })
    }
}

/// Session token from the cookie, falling back to the Authorization header
pub fn session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| extract_bearer_token(req))
}

fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

fn same_site(config: &SessionConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// Cookie carrying a freshly issued session token
pub fn session_cookie(config: &SessionConfig, token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop the session
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .finish();
    cookie.make_removal();
    cookie
}
