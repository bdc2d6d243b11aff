//! HTTP routes, grouped the way the dashboard navigates

pub mod admin;
pub mod contractor;
pub mod health;
pub mod settings;
pub mod stores;
pub mod testimonials;
pub mod users;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use bo_shared::ApiResponse;

/// Register every route group
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(admin::configure)
        .configure(contractor::configure)
        .configure(stores::configure)
        .configure(users::configure)
        .configure(settings::configure)
        .configure(testimonials::configure);
}

pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}

pub(crate) fn ok_with<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data).with_message(message))
}

pub(crate) fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(data).with_message(message))
}
