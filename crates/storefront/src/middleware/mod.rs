//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors; added in `main`)
//! 2. `CorsLayer` (browser access for configured origins)
//! 3. `TraceLayer` (request tracing span)
//! 4. Request ID (record `x-request-id` in the span and Sentry scope)
//! 5. Security headers (CSP, nosniff, no-store)

pub mod cors;
pub mod request_id;
pub mod security_headers;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
