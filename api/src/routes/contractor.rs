//! `/contractor`: listings and the two-step registration review

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use bo_core::domain::entities::contractor::RegistrationStep;
use bo_core::errors::DomainError;

use crate::app::AppState;
use crate::dto::{ListParams, RejectRequest};
use crate::handlers::ApiResult;
use crate::middleware::SessionAuth;

use super::{ok, ok_with};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contractor")
            .wrap(SessionAuth)
            .route("", web::get().to(list_contractors))
            .route("/requests/{step}", web::get().to(list_requests))
            .route("/requests/{step}/approve/{id}", web::patch().to(approve_step))
            .route("/requests/{step}/reject/{id}", web::patch().to(reject_step))
            .route("/block/{id}", web::patch().to(block))
            .route("/unblock/{id}", web::patch().to(unblock))
            .route("/reopen/{id}", web::patch().to(reopen))
            .route("/{id}", web::get().to(get_contractor)),
    );
}

/// `step-one` / `step-two`; anything else is an unknown route
fn parse_step(segment: &str) -> Result<RegistrationStep, DomainError> {
    [RegistrationStep::One, RegistrationStep::Two]
        .into_iter()
        .find(|step| step.slug() == segment)
        .ok_or_else(|| DomainError::not_found("Registration step"))
}

async fn list_contractors(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    params.validate()?;
    let page = state.contractors.list(&params.to_query()?).await?;
    Ok(ok(params.stamp(page)))
}

async fn get_contractor(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(ok(state.contractors.get(id.into_inner()).await?))
}

/// GET /contractor/requests/{step}: contractors waiting at that step
async fn list_requests(
    state: web::Data<AppState>,
    step: web::Path<String>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let step = parse_step(&step)?;
    params.validate()?;
    let page = state
        .contractors
        .list_requests(step, params.to_query()?)
        .await?;
    Ok(ok(params.stamp(page)))
}

async fn approve_step(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (step, id) = path.into_inner();
    let contractor = state.contractors.approve_step(parse_step(&step)?, id).await?;
    Ok(ok_with(contractor, "Contractor approved"))
}

async fn reject_step(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<RejectRequest>,
) -> ApiResult<HttpResponse> {
    let (step, id) = path.into_inner();
    body.validate()?;
    let contractor = state
        .contractors
        .reject_step(parse_step(&step)?, id, &body.reason)
        .await?;
    Ok(ok_with(contractor, "Contractor rejected"))
}

async fn block(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let contractor = state.contractors.block(id.into_inner()).await?;
    Ok(ok_with(contractor, "Contractor blocked"))
}

async fn unblock(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let contractor = state.contractors.unblock(id.into_inner()).await?;
    Ok(ok_with(contractor, "Contractor unblocked"))
}

async fn reopen(state: web::Data<AppState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let contractor = state.contractors.reopen(id.into_inner()).await?;
    Ok(ok_with(contractor, "Contractor sent back to review"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_step_slugs() {
        assert_eq!(parse_step("step-one").unwrap(), RegistrationStep::One);
        assert_eq!(parse_step("step-two").unwrap(), RegistrationStep::Two);
        assert!(parse_step("step-three").is_err());
    }
}
