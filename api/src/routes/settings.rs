//! `/settings`: job type and product type catalogs.
//!
//! Both catalogs share one set of handlers; each resource carries its
//! [`LookupKind`] as resource data.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use bo_core::domain::entities::lookup::LookupKind;

use crate::app::AppState;
use crate::dto::{ListParams, UploadForm};
use crate::handlers::ApiResult;
use crate::middleware::SessionAuth;

use super::{created, ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .wrap(SessionAuth)
            .configure(|cfg| catalog_routes(cfg, LookupKind::JobType, "job-type", "job-types"))
            .configure(|cfg| {
                catalog_routes(cfg, LookupKind::ProductType, "product-type", "product-types")
            }),
    );
}

fn catalog_routes(cfg: &mut web::ServiceConfig, kind: LookupKind, singular: &str, plural: &str) {
    let kind = web::Data::new(kind);
    cfg.service(
        web::resource(format!("/get-all-{}", plural))
            .app_data(kind.clone())
            .route(web::get().to(list_entries)),
    )
    .service(
        web::resource(format!("/add-{}", singular))
            .app_data(kind.clone())
            .route(web::post().to(create_entry)),
    )
    .service(
        web::resource(format!("/update-{}/{{id}}", singular))
            .app_data(kind.clone())
            .route(web::put().to(update_entry)),
    )
    .service(
        web::resource(format!("/delete-{}/{{id}}", singular))
            .app_data(kind)
            .route(web::delete().to(delete_entry)),
    );
}

async fn list_entries(
    state: web::Data<AppState>,
    kind: web::Data<LookupKind>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.catalog.list(**kind, &params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

/// Multipart: `name` plus an `image` file
async fn create_entry(
    state: web::Data<AppState>,
    kind: web::Data<LookupKind>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = UploadForm::read(payload, state.max_upload_bytes).await?;
    let image = form.require_image()?;
    let name = form.require_text("name")?;

    let entry = state.catalog.create(**kind, name, image).await?;
    Ok(created(entry, &format!("{} created", kind.label())))
}

/// Multipart: optional `name`, optional replacement `image`
async fn update_entry(
    state: web::Data<AppState>,
    kind: web::Data<LookupKind>,
    id: web::Path<Uuid>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = UploadForm::read(payload, state.max_upload_bytes).await?;
    let image = form.take_image();

    let entry = state
        .catalog
        .update(**kind, id.into_inner(), form.text("name"), image)
        .await?;
    Ok(ok_with(entry, &format!("{} updated", kind.label())))
}

async fn delete_entry(
    state: web::Data<AppState>,
    kind: web::Data<LookupKind>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let entry = state.catalog.delete(**kind, id.into_inner()).await?;
    Ok(ok_with(entry, &format!("{} deleted", kind.label())))
}
