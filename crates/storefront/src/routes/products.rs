//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use trailhead_core::Price;

use crate::catalog::{PREORDER_DISCOUNT, Product, SIZES};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog responses may be cached briefly; the catalog only changes on deploy.
const CATALOG_CACHE_CONTROL: &str = "public, max-age=300";

/// Product detail with the sizes offered on the product page.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub sizes: &'static [&'static str],
}

/// Quote query parameters.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub quantity: Option<u32>,
}

/// Pre-order price breakdown for a product and quantity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub slug: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub subtotal: Price,
    pub discount_rate: Decimal,
    pub total: Price,
}

/// List every product in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().list_products().to_vec();
    ([(CACHE_CONTROL, CATALOG_CACHE_CONTROL)], Json(products))
}

/// Show one product by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let product = find(&state, &slug)?;

    Ok((
        [(CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(ProductDetail {
            product: product.clone(),
            sizes: &SIZES,
        }),
    ))
}

/// Quote the pre-order total for `quantity` units (default 1).
#[instrument(skip(state, query))]
pub async fn quote(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: std::result::Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<QuoteResponse>> {
    let Query(query) = query.map_err(|_| AppError::BadRequest("Invalid quantity".to_string()))?;
    let quantity = query.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let product = find(&state, &slug)?;
    let too_large = || AppError::BadRequest("Quantity too large".to_string());
    let subtotal = product.price.checked_times(quantity).ok_or_else(too_large)?;
    let total = product.preorder_total(quantity).ok_or_else(too_large)?;

    Ok(Json(QuoteResponse {
        slug: product.slug.clone(),
        quantity,
        unit_price: product.price,
        subtotal,
        discount_rate: PREORDER_DISCOUNT,
        total,
    }))
}

fn find<'a>(state: &'a AppState, slug: &str) -> Result<&'a Product> {
    state
        .catalog()
        .find_by_slug(slug)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
