//! Trailhead Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing
//! the router to be exercised in tests and reused by tooling.
//!
//! - [`catalog`] - Read-only product catalog
//! - [`preorders`] - Pre-order intake, id allocation, and persistence
//! - [`routes`] - HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod preorders;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; `main` adds them outermost so they cover
/// the whole request.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config().allowed_origins);

    routes::routes()
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
