use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use super::handlers;
use crate::{GuardConfig, LoginAttemptRepository, PasswordHistoryRepository};

#[derive(Clone)]
pub struct AppState<L, H> {
    pub login_attempts: L,
    pub password_history: H,
    pub config: GuardConfig,
}

impl<L, H> AppState<L, H> {
    pub fn new(login_attempts: L, password_history: H) -> Self {
        Self::with_config(login_attempts, password_history, GuardConfig::default())
    }

    pub fn with_config(login_attempts: L, password_history: H, config: GuardConfig) -> Self {
        Self {
            login_attempts,
            password_history,
            config,
        }
    }
}

/// `POST /check-rate-limit` and `POST /validate-password`.
///
/// Wrap the router in [`edge_function`](super::cors::edge_function) to serve
/// browser preflights. That layer answers every `OPTIONS` request itself; the
/// `OPTIONS` routes here only answer (200, no body) when the router is served
/// without a CORS layer.
pub fn guard_routes<L, H>() -> Router<AppState<L, H>>
where
    L: LoginAttemptRepository + Clone + Send + Sync + 'static,
    H: PasswordHistoryRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/check-rate-limit",
            post(handlers::check_rate_limit::<L, H>).options(preflight),
        )
        .route(
            "/validate-password",
            post(handlers::validate_password::<L, H>).options(preflight),
        )
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}
