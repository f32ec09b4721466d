//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every error response is a JSON body of the form
//! `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::preorders::PreorderError;

/// Message returned when a pre-order is missing email, product or size.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Message returned when a pre-order could not be persisted.
pub const PREORDER_FAILED_MESSAGE: &str = "Failed to process pre-order";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A pre-order passed validation but could not be saved.
    #[error("Pre-order failed: {0}")]
    PreorderFailed(#[source] PreorderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PreorderError> for AppError {
    fn from(err: PreorderError) -> Self {
        match err {
            PreorderError::MissingFields(_) => Self::BadRequest(MISSING_FIELDS_MESSAGE.to_string()),
            e @ (PreorderError::Store(_) | PreorderError::IdsExhausted) => Self::PreorderFailed(e),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::PreorderFailed(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::PreorderFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let error = match self {
            Self::PreorderFailed(_) => PREORDER_FAILED_MESSAGE.to_string(),
            Self::NotFound(message) | Self::BadRequest(message) => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for storefront actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
