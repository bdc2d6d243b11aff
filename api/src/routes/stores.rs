//! `/stores`: store listings and moderation

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ListParams, RejectRequest};
use crate::handlers::ApiResult;
use crate::middleware::SessionAuth;

use super::{ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stores")
            .wrap(SessionAuth)
            .route("", web::get().to(list_stores))
            .route("/{id}", web::get().to(get_store))
            .route("/{id}/approve", web::put().to(approve))
            .route("/{id}/reject", web::put().to(reject))
            .route("/{id}/block", web::put().to(block))
            .route("/{id}/unblock", web::put().to(unblock))
            .route("/{id}/reopen", web::put().to(reopen)),
    );
}

async fn list_stores(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.stores.list(&params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

async fn get_store(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    Ok(ok(state.stores.get(id.into_inner()).await?))
}

async fn approve(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let store = state.stores.approve(id.into_inner()).await?;
    Ok(ok_with(store, "Store approved"))
}

async fn reject(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<RejectRequest>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let store = state.stores.reject(id.into_inner(), &body.reason).await?;
    Ok(ok_with(store, "Store rejected"))
}

async fn block(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let store = state.stores.block(id.into_inner()).await?;
    Ok(ok_with(store, "Store blocked"))
}

async fn unblock(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let store = state.stores.unblock(id.into_inner()).await?;
    Ok(ok_with(store, "Store unblocked"))
}

async fn reopen(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let store = state.stores.reopen(id.into_inner()).await?;
    Ok(ok_with(store, "Store sent back to review"))
}
