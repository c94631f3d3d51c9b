pub mod health;

use std::time::Duration;

use anyhow::anyhow;
use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    BoxError, Router,
};
use tower::{
    timeout::{error::Elapsed, TimeoutLayer},
    ServiceBuilder,
};

use crate::errors::AppError;
use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/jobs/match", post(handlers::handle_match_jobs))
        .route(
            "/api/v1/jobs/match-explanation",
            post(handlers::handle_match_explanation),
        )
        .with_state(state);

    with_request_timeout(router, request_timeout)
}

/// Caps every request at `timeout`. Expiry is answered with the regular
/// `TIMEOUT` error body.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(anyhow!("Unhandled middleware error: {err}"))
    }
}
