//! HTTP handlers for the guard endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use super::error::AppError;
use super::routes::AppState;
use crate::actions::{CheckRateLimitAction, RateLimitDecision, ValidatePasswordAction};
use crate::api::{
    RateLimitRequest, RateLimitResponse, ValidatePasswordRequest, ValidatePasswordResponse,
};
use crate::validators::ValidationError;
use crate::{LoginAttemptRepository, PasswordHistoryRepository};

/// Record a login outcome and report whether the identifier may proceed.
///
/// POST /check-rate-limit
pub async fn check_rate_limit<L, H>(
    State(state): State<AppState<L, H>>,
    body: Result<Json<RateLimitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    L: LoginAttemptRepository + Clone + Send + Sync + 'static,
    H: Clone + Send + Sync + 'static,
{
    let Json(body) = body?;
    let success = body.succeeded();
    let identifier = body
        .identifier
        .filter(|identifier| !identifier.is_empty())
        .ok_or(ValidationError::IdentifierEmpty)?;

    let action =
        CheckRateLimitAction::with_config(state.login_attempts, state.config.rate_limit);

    let now = Utc::now();
    let decision = action.execute_at(&identifier, success, now).await?;

    let status = match decision {
        RateLimitDecision::Allowed { .. } => StatusCode::OK,
        RateLimitDecision::LockedOut { .. } => StatusCode::TOO_MANY_REQUESTS,
    };

    Ok((status, Json(RateLimitResponse::from_decision(&decision, now))))
}

/// Reject a password hash the user has used recently.
///
/// POST /validate-password
pub async fn validate_password<L, H>(
    State(state): State<AppState<L, H>>,
    body: Result<Json<ValidatePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    L: Clone + Send + Sync + 'static,
    H: PasswordHistoryRepository + Clone + Send + Sync + 'static,
{
    let Json(body) = body?;
    let user_id = body.user_id.unwrap_or_default();
    let new_password_hash = body.new_password_hash.unwrap_or_default();

    let action =
        ValidatePasswordAction::with_config(state.password_history, state.config.password_history);

    let decision = action.execute(&user_id, &new_password_hash).await?;

    Ok((StatusCode::OK, Json(ValidatePasswordResponse::from(decision))))
}
