//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::preorders::PreorderStore;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the pre-order file is readable. Returns 503 Service Unavailable
/// if it is not.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.preorders().store().list_all().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
