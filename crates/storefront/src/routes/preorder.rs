//! Pre-order intake route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::instrument;
use trailhead_core::OrderId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::preorders::PreorderRequest;
use crate::state::AppState;

/// Confirmation message shown after a successful pre-order.
pub const CONFIRMATION_MESSAGE: &str =
    "Pre-order received! We'll email you as soon as your order ships.";

/// Successful pre-order acknowledgement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreorderResponse {
    pub success: bool,
    pub message: String,
    pub order_id: OrderId,
}

/// Accept a pre-order submission.
///
/// Responds 200 with the new order id, 400 `{"error":"Missing required
/// fields"}` when email, product or size is missing, or 500 `{"error":"Failed
/// to process pre-order"}` when the record cannot be saved.
#[instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PreorderRequest>, JsonRejection>,
) -> Result<Json<PreorderResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected malformed pre-order body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    add_breadcrumb(
        "preorder",
        "Pre-order submitted",
        &[
            ("product", request.product.as_deref().unwrap_or_default()),
            ("size", request.size.as_deref().unwrap_or_default()),
        ],
    );

    let record = state.preorders().submit(request).await?;

    Ok(Json(PreorderResponse {
        success: true,
        message: CONFIRMATION_MESSAGE.to_string(),
        order_id: record.id,
    }))
}
