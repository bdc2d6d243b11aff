//! `/user`: platform user management

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AddUserRequest, EditUserRequest, ListParams};
use crate::handlers::ApiResult;
use crate::middleware::SessionAuth;

use super::{created, ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .wrap(SessionAuth)
            .route("/get-all-users", web::get().to(list_users))
            .route("/add-user", web::post().to(add_user))
            .route("/edit/{id}", web::patch().to(edit_user))
            .route("/block/{id}", web::put().to(block_user))
            .route("/unblock/{id}", web::put().to(unblock_user))
            .route("/{id}", web::get().to(get_user)),
    );
}

async fn list_users(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.users.list(&params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

async fn get_user(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    Ok(ok(state.users.get(id.into_inner()).await?))
}

async fn add_user(
    state: web::Data<AppState>,
    body: web::Json<AddUserRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;
    let user = state.users.create(body.into()).await?;
    Ok(created(user, "User created"))
}

async fn edit_user(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<EditUserRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;
    let user = state.users.edit(id.into_inner(), body.into()).await?;
    Ok(ok_with(user, "User updated"))
}

async fn block_user(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let user = state.users.block(id.into_inner()).await?;
    Ok(ok_with(user, "User blocked"))
}

async fn unblock_user(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let user = state.users.unblock(id.into_inner()).await?;
    Ok(ok_with(user, "User unblocked"))
}
