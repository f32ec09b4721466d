//! Pre-order intake.
//!
//! A pre-order records purchase interest before an item ships; no payment is
//! taken. [`PreorderService::submit`] validates a request, stamps it with a
//! fresh [`OrderId`] and the current time, and appends it to a
//! [`PreorderStore`]. Every call is an independent validate-then-persist
//! transaction.

mod id;
mod store;

pub use id::OrderIdAllocator;
pub use store::{JsonFileStore, MemoryStore, PreorderStore, StoreError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trailhead_core::{OrderId, PreorderStatus};

use crate::catalog::Catalog;

/// A stored pre-order. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreorderRecord {
    pub id: OrderId,
    pub email: String,
    pub product: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub total_price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: PreorderStatus,
}

/// Pre-order submission as sent by the product page.
///
/// Every field is optional on the wire so that an incomplete submission is
/// reported as missing fields rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreorderRequest {
    pub email: Option<String>,
    pub product: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<u32>,
    /// Accepts either a decimal string (`"187.00"`) or a JSON number.
    pub total_price: Option<Decimal>,
}

/// Errors returned by [`PreorderService::submit`].
#[derive(Debug, Error)]
pub enum PreorderError {
    /// One or more required fields were absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The record could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every order id up to `i64::MAX` has been issued.
    #[error("order id space exhausted")]
    IdsExhausted,
}

/// Validates submissions and appends them to a store.
#[derive(Debug)]
pub struct PreorderService<S> {
    store: S,
    catalog: Catalog,
    ids: OrderIdAllocator,
}

impl<S: PreorderStore> PreorderService<S> {
    /// Create a service over `store`.
    ///
    /// Reads the existing collection once so that new ids are allocated past
    /// every id already stored. An unreadable collection is reported and the
    /// allocator falls back to the clock alone; requests that touch the store
    /// keep failing until the file is repaired.
    pub async fn new(store: S, catalog: Catalog) -> Self {
        let last_id = match store.list_all().await {
            Ok(existing) => {
                let last_id = existing
                    .iter()
                    .map(|r| r.id.as_i64())
                    .max()
                    .unwrap_or_default();
                tracing::info!(records = existing.len(), last_id, "Pre-order store opened");
                last_id
            }
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                tracing::error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Pre-order store unreadable at startup"
                );
                0
            }
        };

        Self {
            store,
            catalog,
            ids: OrderIdAllocator::starting_after(last_id),
        }
    }

    /// Validate and persist a pre-order.
    ///
    /// Email, product and size must be present and non-empty. Color, quantity
    /// and total price are taken as given; a missing quantity counts as one
    /// unit and a missing total is quoted from the catalog (zero when the
    /// product is unknown).
    ///
    /// # Errors
    ///
    /// Returns `PreorderError::MissingFields` without touching the store,
    /// `PreorderError::IdsExhausted` if no fresh id is left, or
    /// `PreorderError::Store` if the append fails.
    pub async fn submit(&self, request: PreorderRequest) -> Result<PreorderRecord, PreorderError> {
        let PreorderRequest {
            email,
            product,
            color,
            size,
            quantity,
            total_price,
        } = request;

        let (email, product, size) = match (required(email), required(product), required(size)) {
            (Some(email), Some(product), Some(size)) => (email, product, size),
            (email, product, size) => {
                let missing = [
                    ("email", email.is_none()),
                    ("product", product.is_none()),
                    ("size", size.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(PreorderError::MissingFields(missing));
            }
        };

        let quantity = quantity.unwrap_or(1);
        let total_price = total_price.unwrap_or_else(|| self.quote(&product, quantity));

        let id = self.ids.next_id().ok_or(PreorderError::IdsExhausted)?;
        let record = PreorderRecord {
            id,
            email,
            product,
            color: color.unwrap_or_default(),
            size,
            quantity,
            total_price,
            timestamp: Utc::now(),
            status: PreorderStatus::Pending,
        };

        self.store.append(&record).await?;

        tracing::info!(
            order_id = %record.id,
            product = %record.product,
            size = %record.size,
            quantity = record.quantity,
            "Pre-order recorded"
        );

        Ok(record)
    }

    /// All stored pre-orders in submission order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<PreorderRecord>, StoreError> {
        self.store.list_all().await
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn quote(&self, product: &str, quantity: u32) -> Decimal {
        self.catalog
            .find_by_name(product)
            .and_then(|p| p.preorder_total(quantity))
            .map_or(Decimal::ZERO, |total| total.to_cents_precision())
    }
}

/// Keep a field only if it is present and non-empty.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    async fn service() -> PreorderService<MemoryStore> {
        PreorderService::new(MemoryStore::new(), Catalog::builtin()).await
    }

    fn fleece_request() -> PreorderRequest {
        PreorderRequest {
            email: Some("a@b.com".to_string()),
            product: Some("Trailblazer Fleece".to_string()),
            color: Some("Pink".to_string()),
            size: Some("M".to_string()),
            quantity: Some(2),
            total_price: Some(Decimal::new(18700, 2)),
        }
    }

    #[tokio::test]
    async fn test_submit_valid_request() {
        let service = service().await;
        let record = service.submit(fleece_request()).await.unwrap();

        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.product, "Trailblazer Fleece");
        assert_eq!(record.color, "Pink");
        assert_eq!(record.size, "M");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.total_price, Decimal::new(18700, 2));
        assert_eq!(record.status, PreorderStatus::Pending);

        let stored = service.list().await.unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn test_submit_missing_email_persists_nothing() {
        let service = service().await;
        let request = PreorderRequest {
            email: Some(String::new()),
            product: Some("Trail Capri".to_string()),
            size: Some("S".to_string()),
            ..PreorderRequest::default()
        };

        let err = service.submit(request).await.unwrap_err();
        assert!(matches!(err, PreorderError::MissingFields(ref f) if f == &["email"]));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_reports_every_missing_field() {
        let service = service().await;
        let err = service
            .submit(PreorderRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: email, product, size"
        );
    }

    #[tokio::test]
    async fn test_whitespace_is_not_empty() {
        // Only absent or zero-length values are rejected.
        let service = service().await;
        let request = PreorderRequest {
            email: Some(" ".to_string()),
            product: Some("Carabiner".to_string()),
            size: Some("M".to_string()),
            ..PreorderRequest::default()
        };
        assert!(service.submit(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_optional_fields_use_defaults() {
        let service = service().await;
        let request = PreorderRequest {
            email: Some("hiker@example.com".to_string()),
            product: Some("Trailblazer Fleece".to_string()),
            size: Some("L".to_string()),
            ..PreorderRequest::default()
        };

        let record = service.submit(request).await.unwrap();
        assert_eq!(record.quantity, 1);
        assert_eq!(record.color, "");
        // 110 * 0.85
        assert_eq!(record.total_price.to_string(), "93.50");
    }

    #[tokio::test]
    async fn test_unknown_product_without_total_is_zero() {
        let service = service().await;
        let request = PreorderRequest {
            email: Some("hiker@example.com".to_string()),
            product: Some("Mystery Jacket".to_string()),
            size: Some("XL".to_string()),
            quantity: Some(3),
            ..PreorderRequest::default()
        };

        let record = service.submit(request).await.unwrap();
        assert_eq!(record.total_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() {
        let service = service().await;
        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(service.submit(fleece_request()).await.unwrap().id);
        }

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_new_allocates_past_existing_ids() {
        let store = MemoryStore::new();
        let far_future = i64::MAX - 10;
        let mut existing = service().await.submit(fleece_request()).await.unwrap();
        existing.id = OrderId::new(far_future);
        store.append(&existing).await.unwrap();

        let service = PreorderService::new(store, Catalog::builtin()).await;
        let record = service.submit(fleece_request()).await.unwrap();
        assert_eq!(record.id.as_i64(), far_future + 1);
    }

    #[tokio::test]
    async fn test_max_stored_id_is_never_reissued() {
        let store = MemoryStore::new();
        let mut existing = service().await.submit(fleece_request()).await.unwrap();
        existing.id = OrderId::new(i64::MAX);
        store.append(&existing).await.unwrap();

        let service = PreorderService::new(store, Catalog::builtin()).await;
        let err = service.submit(fleece_request()).await.unwrap_err();
        assert!(matches!(err, PreorderError::IdsExhausted));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_store_does_not_block_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preorders.json");
        std::fs::write(&path, "{ not json").unwrap();

        let service = PreorderService::new(JsonFileStore::new(&path), Catalog::builtin()).await;
        let err = service.submit(fleece_request()).await.unwrap_err();
        assert!(matches!(err, PreorderError::Store(StoreError::Json(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_request_accepts_string_or_number_total() {
        let from_string: PreorderRequest =
            serde_json::from_str(r#"{"totalPrice": "187.00"}"#).unwrap();
        assert_eq!(from_string.total_price, Some(Decimal::new(18700, 2)));

        let from_number: PreorderRequest = serde_json::from_str(r#"{"totalPrice": 76.5}"#).unwrap();
        assert_eq!(from_number.total_price, Some(Decimal::new(765, 1)));
    }
}
