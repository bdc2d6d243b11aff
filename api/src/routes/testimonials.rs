//! `/testimonials`: marketing testimonials with images

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use bo_core::errors::{DomainError, ValidationError};
use bo_core::services::testimonial::{NewTestimonial, TestimonialChanges};

use crate::app::AppState;
use crate::dto::{ListParams, UploadForm};
use crate::handlers::ApiResult;
use crate::middleware::SessionAuth;

use super::{created, ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/testimonials")
            .wrap(SessionAuth)
            .service(
                web::resource("")
                    .route(web::get().to(list_testimonials))
                    .route(web::post().to(create_testimonial)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_testimonial))
                    .route(web::put().to(update_testimonial))
                    .route(web::delete().to(delete_testimonial)),
            ),
    );
}

async fn list_testimonials(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.testimonials.list(&params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

async fn get_testimonial(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(ok(state.testimonials.get(id.into_inner()).await?))
}

/// Multipart: `name`, `feedback`, `rating` (1-5) and an `image` file
async fn create_testimonial(
    state: web::Data<AppState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = UploadForm::read(payload, state.max_upload_bytes).await?;
    let image = form.require_image()?;
    let input = NewTestimonial {
        name: form.require_text("name")?.to_string(),
        feedback: form.require_text("feedback")?.to_string(),
        rating: form
            .integer("rating")?
            .ok_or_else(|| DomainError::from(ValidationError::required("rating")))?,
    };

    let testimonial = state.testimonials.create(input, image).await?;
    Ok(created(testimonial, "Testimonial created"))
}

/// Multipart: any of `name`, `feedback`, `rating`, `image`
async fn update_testimonial(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = UploadForm::read(payload, state.max_upload_bytes).await?;
    let image = form.take_image();
    let changes = TestimonialChanges {
        name: form.text("name").map(str::to_string),
        feedback: form.text("feedback").map(str::to_string),
        rating: form.integer("rating")?,
    };

    let testimonial = state
        .testimonials
        .update(id.into_inner(), changes, image)
        .await?;
    Ok(ok_with(testimonial, "Testimonial updated"))
}

async fn delete_testimonial(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let testimonial = state.testimonials.delete(id.into_inner()).await?;
    Ok(ok_with(testimonial, "Testimonial deleted"))
}
