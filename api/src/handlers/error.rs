//! Maps domain and request errors onto the JSON error envelope.
//!
//! Every failure leaves the API as `{"error", "message", "details"?,
//! "timestamp"}`. Internal errors are logged with their cause and answered
//! with a generic message.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use bo_core::errors::{AuthError, DomainError, TokenError};
use bo_shared::{error_codes, ErrorResponse};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// DTO validation failed
    #[error("Request validation failed")]
    InvalidInput(#[from] ValidationErrors),

    /// Body, path or query could not be parsed
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

/// HTTP status for a domain error
pub fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation { .. }
        | DomainError::ValidationErr(_)
        | DomainError::Conflict { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidTransition { .. } | DomainError::ConcurrentModification { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Database { .. } | DomainError::Storage { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::AccountBlocked
            | AuthError::InsufficientPermissions
            | AuthError::SuperadminProtected { .. } => StatusCode::FORBIDDEN,
            AuthError::LoginLocked { .. } => StatusCode::TOO_MANY_REQUESTS,
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

fn domain_body(err: &DomainError) -> ErrorResponse {
    if err.is_internal() {
        error!(error = %err, code = err.error_code(), "Request failed");
        return ErrorResponse::new(err.error_code(), "An internal error occurred");
    }

    let body = ErrorResponse::new(err.error_code(), err.to_string());
    match err {
        DomainError::ValidationErr(validation) => match validation.field() {
            Some(field) => body.add_detail("field", field),
            None => body,
        },
        DomainError::Auth(AuthError::LoginLocked { retry_after_secs }) => {
            body.add_detail("retryAfterSecs", retry_after_secs)
        }
        _ => body,
    }
}

fn validation_body(errors: &ValidationErrors) -> ErrorResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field.to_string(), messages);
    }
    body
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(err) => domain_status(err),
            Self::InvalidInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Domain(err) => domain_body(err),
            Self::InvalidInput(errors) => validation_body(errors),
            Self::BadRequest(message) => ErrorResponse::new(error_codes::BAD_REQUEST, message),
        };

        let mut response = HttpResponse::build(self.status_code());
        if let Self::Domain(DomainError::Auth(AuthError::LoginLocked { retry_after_secs })) = self {
            response.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        }
        response.json(body)
    }
}

fn extractor_error(req: &HttpRequest, kind: &str, message: String) -> actix_web::Error {
    warn!(method = %req.method(), path = %req.path(), kind, "Rejected malformed request: {}", message);
    ApiError::BadRequest(message).into()
}

/// JSON body extractor settings with envelope errors
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, req| {
            let message = match &err {
                JsonPayloadError::ContentType => "Expected an application/json body".to_string(),
                JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {}", e),
                other => other.to_string(),
            };
            extractor_error(req, "json", message)
        })
}

/// Query string extractor settings with envelope errors
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, req| {
        extractor_error(req, "query", format!("Invalid query string: {}", err))
    })
}

/// Path extractor settings; malformed ids answer 400
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req| {
        extractor_error(req, "path", format!("Invalid path parameter: {}", err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_core::errors::ValidationError;

    #[test]
    fn maps_domain_errors_to_statuses() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("Email already exists"), StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials.into(), StatusCode::BAD_REQUEST),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::AccountBlocked.into(), StatusCode::FORBIDDEN),
            (
                AuthError::SuperadminProtected {
                    action: "deleted".to_string(),
                }
                .into(),
                StatusCode::FORBIDDEN,
            ),
            (DomainError::not_found("Store"), StatusCode::NOT_FOUND),
            (
                DomainError::InvalidTransition {
                    from: "Approved".to_string(),
                    action: "reject".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                AuthError::LoginLocked {
                    retry_after_secs: 30,
                }
                .into(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (TokenError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err.clone()).status_code(), status, "{:?}", err);
        }
    }

    #[test]
    fn internal_messages_are_hidden() {
        let body = domain_body(&DomainError::Database {
            message: "Duplicate entry for key 'PRIMARY'".to_string(),
        });
        assert_eq!(body.error, error_codes::INTERNAL_ERROR);
        assert_eq!(body.message, "An internal error occurred");
    }

    #[test]
    fn validation_errors_carry_the_field() {
        let body = domain_body(&ValidationError::required("name").into());
        assert_eq!(body.error, error_codes::VALIDATION_ERROR);
        let details = body.details.expect("details");
        assert_eq!(details["field"], "name");
    }

    #[test]
    fn login_lock_sets_retry_after() {
        let err = ApiError::from(DomainError::from(AuthError::LoginLocked {
            retry_after_secs: 42,
        }));
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "42"
        );
    }
}
