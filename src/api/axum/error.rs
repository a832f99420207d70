use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::ErrorResponse;
use crate::validators::ValidationError;
use crate::AuthError;

/// converts `AuthError` into appropriate HTTP responses
#[derive(Debug)]
pub struct AppError(pub AuthError);

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self(AuthError::Validation(err))
    }
}

/// Bodies that are not valid JSON, or have the wrong shape, are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AuthError::Validation(ValidationError::InvalidRequestBody(
            rejection.body_text(),
        )))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DatabaseError(_) | AuthError::ConfigurationError(_) => {
                log::error!(
                    target: "carelock",
                    "msg=\"request failed\", error=\"{}\"",
                    self.0
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
