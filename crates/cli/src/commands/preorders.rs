//! Pre-order inspection.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use trailhead_core::Price;
use trailhead_storefront::preorders::{JsonFileStore, PreorderRecord, PreorderStore, StoreError};

/// Aggregate figures for one product.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductSummary {
    pub orders: usize,
    pub units: u64,
    pub revenue: Decimal,
}

/// Log every stored pre-order in submission order.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read or parsed.
pub async fn list(path: &Path) -> Result<(), StoreError> {
    let records = JsonFileStore::new(path).list_all().await?;

    tracing::info!(path = %path.display(), "{} pre-orders", records.len());
    for r in &records {
        tracing::info!(
            "  #{} {} {} / {} / {} x{} = {} [{}] {}",
            r.id,
            r.timestamp.format("%Y-%m-%d %H:%M"),
            r.product,
            if r.color.is_empty() { "-" } else { &r.color },
            r.size,
            r.quantity,
            Price::usd(r.total_price),
            r.status,
            r.email,
        );
    }

    Ok(())
}

/// Log order count, units, and revenue per product.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read or parsed.
pub async fn summary(path: &Path) -> Result<(), StoreError> {
    let records = JsonFileStore::new(path).list_all().await?;
    let by_product = summarize(&records);

    tracing::info!(path = %path.display(), "{} pre-orders across {} products", records.len(), by_product.len());
    for (product, s) in &by_product {
        tracing::info!(
            "  {:<20} {:>4} orders {:>5} units {:>12}",
            product,
            s.orders,
            s.units,
            Price::usd(s.revenue).to_string(),
        );
    }

    Ok(())
}

/// Group records by product name.
///
/// Revenue saturates at the `Decimal` range instead of overflowing; a warning
/// names the product whose total was clamped.
pub fn summarize(records: &[PreorderRecord]) -> BTreeMap<&str, ProductSummary> {
    let mut by_product: BTreeMap<&str, ProductSummary> = BTreeMap::new();
    for record in records {
        let entry = by_product.entry(record.product.as_str()).or_default();
        entry.orders += 1;
        entry.units += u64::from(record.quantity);
        entry.revenue = match entry.revenue.checked_add(record.total_price) {
            Some(sum) => sum,
            None => {
                tracing::warn!(
                    product = %record.product,
                    order_id = %record.id,
                    "Revenue overflowed; clamping"
                );
                entry.revenue.saturating_add(record.total_price)
            }
        };
    }
    by_product
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use trailhead_core::{OrderId, PreorderStatus};

    use super::*;

    fn record(id: i64, product: &str, quantity: u32, total: Decimal) -> PreorderRecord {
        PreorderRecord {
            id: OrderId::new(id),
            email: "a@b.com".to_string(),
            product: product.to_string(),
            color: String::new(),
            size: "M".to_string(),
            quantity,
            total_price: total,
            timestamp: Utc::now(),
            status: PreorderStatus::Pending,
        }
    }

    #[test]
    fn test_summarize_groups_by_product() {
        let records = vec![
            record(1, "Carabiner", 3, Decimal::new(3060, 2)),
            record(2, "Summit Pant", 1, Decimal::new(7650, 2)),
            record(3, "Carabiner", 1, Decimal::new(1020, 2)),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.len(), 2);
        assert_eq!(
            summary["Carabiner"],
            ProductSummary {
                orders: 2,
                units: 4,
                revenue: Decimal::new(4080, 2),
            }
        );
        assert_eq!(summary["Summit Pant"].orders, 1);
    }

    #[test]
    fn test_summarize_clamps_revenue_overflow() {
        let records = vec![
            record(1, "Carabiner", 1, Decimal::MAX),
            record(2, "Carabiner", 1, Decimal::MAX),
        ];

        let summary = summarize(&records);
        assert_eq!(summary["Carabiner"].orders, 2);
        assert_eq!(summary["Carabiner"].revenue, Decimal::MAX);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
