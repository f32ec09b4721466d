//! Catalog inspection.

use std::path::Path;

use trailhead_storefront::catalog::{Catalog, CatalogError};

/// Log every product in catalog order.
///
/// # Errors
///
/// Returns `CatalogError` if a catalog file was given and cannot be loaded.
pub fn list(path: Option<&Path>) -> Result<(), CatalogError> {
    let catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    tracing::info!("{} products", catalog.len());
    for product in catalog.list_products() {
        let colors: Vec<&str> = product.colors.iter().map(|c| c.name.as_str()).collect();
        tracing::info!(
            "  {:<20} {:<20} {:>9}  {}{}",
            product.slug,
            product.name,
            product.price.to_string(),
            colors.join(", "),
            if product.pre_order { "  (pre-order)" } else { "" }
        );
    }

    Ok(())
}
