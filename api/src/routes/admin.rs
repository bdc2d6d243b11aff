//! `/admin`: login, session and admin management

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use bo_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{
    AddAdminRequest, AdminEnvelope, EditAdminRequest, ListParams, LoginRequest, LoginResponse,
    SetPasswordRequest,
};
use crate::handlers::ApiResult;
use crate::middleware::{removal_cookie, session_cookie, CurrentAdmin, SessionAuth};

use super::{created, ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/set-password", web::post().to(set_password))
            .service(
                web::scope("")
                    .wrap(SessionAuth)
                    .route("/check-auth", web::get().to(check_auth))
                    .route("/addadmin", web::post().to(add_admin))
                    .route("/get-all-admins", web::get().to(list_admins))
                    .route("/block-admin/{id}", web::patch().to(block_admin))
                    .route("/unblock-admin/{id}", web::patch().to(unblock_admin))
                    .route("/edit-admin/{id}", web::patch().to(edit_admin))
                    .route("/delete-admin/{id}", web::delete().to(delete_admin)),
            ),
    );
}

/// POST /admin/login
///
/// Sets the session cookie and returns the admin profile. Unknown email and
/// wrong password are indistinguishable (400); a blocked account gets 403
/// and repeated failures 429.
async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let session = state.auth.login(&body.email, &body.password).await?;
    let cookie = session_cookie(&state.session, &session.token, session.expires_in);

    Ok(HttpResponse::Ok().cookie(cookie).json(
        ApiResponse::success(LoginResponse {
            admin: session.admin,
            token: session.token,
            expires_in: session.expires_in,
        })
        .with_message("Login successful"),
    ))
}

/// POST /admin/logout
async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(ApiResponse::message("Logged out"))
}

/// GET /admin/check-auth
async fn check_auth(admin: CurrentAdmin) -> HttpResponse {
    ok(AdminEnvelope {
        admin: admin.into_inner(),
    })
}

/// POST /admin/set-password
async fn set_password(
    state: web::Data<AppState>,
    body: web::Json<SetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let admin = state.auth.set_password(&body.token, &body.password).await?;
    Ok(ok_with(AdminEnvelope { admin }, "Password updated"))
}

/// POST /admin/addadmin
async fn add_admin(
    state: web::Data<AppState>,
    actor: CurrentAdmin,
    body: web::Json<AddAdminRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let admin = state.admins.add_admin(&actor, body.into_new_admin()?).await?;
    Ok(created(AdminEnvelope { admin }, "Admin created"))
}

/// GET /admin/get-all-admins
async fn list_admins(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.admins.list(&params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

async fn block_admin(
    state: web::Data<AppState>,
    actor: CurrentAdmin,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let admin = state.admins.block_admin(&actor, id.into_inner()).await?;
    Ok(ok_with(admin, "Admin blocked"))
}

async fn unblock_admin(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let admin = state.admins.unblock_admin(id.into_inner()).await?;
    Ok(ok_with(admin, "Admin unblocked"))
}

async fn edit_admin(
    state: web::Data<AppState>,
    actor: CurrentAdmin,
    id: web::Path<Uuid>,
    body: web::Json<EditAdminRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let admin = state
        .admins
        .edit_admin(&actor, id.into_inner(), body.into_changes()?)
        .await?;
    Ok(ok_with(admin, "Admin updated"))
}

async fn delete_admin(
    state: web::Data<AppState>,
    actor: CurrentAdmin,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.admins.delete_admin(&actor, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Admin deleted")))
}
