//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pre-order file readable)
//!
//! # Catalog
//! GET  /api/products                    - Product listing
//! GET  /api/products/{slug}             - Product detail
//! GET  /api/products/{slug}/quote       - Pre-order price quote (?quantity=N)
//!
//! # Intake
//! POST /api/preorder                    - Submit a pre-order (JSON)
//! POST /api/subscribe                   - Newsletter sign-up (form)
//! ```

pub mod health;
pub mod newsletter;
pub mod preorder;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
        .route("/{slug}/quote", get(products::quote))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/preorder", post(preorder::submit))
        .route("/subscribe", post(newsletter::subscribe))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
