//! Read-only product catalog.
//!
//! The catalog is loaded once at startup, either from the built-in product
//! list or from a JSON file (`STOREFRONT_CATALOG_PATH`), and is never mutated
//! afterwards. Lookups are pure and allocation-free.
//!
//! # Catalog file format
//!
//! ```json
//! [
//!   {
//!     "slug": "carabiner",
//!     "name": "Carabiner",
//!     "price": { "amount": "12" },
//!     "preOrder": true,
//!     "images": ["/images/carabiner.png"],
//!     "colors": [
//!       { "name": "Default", "gradient": "linear-gradient(...)", "images": ["/images/carabiner.png"] }
//!     ]
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trailhead_core::Price;

/// Sizes offered for apparel on the product page.
pub const SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

/// Discount applied to pre-order purchases (15% off).
pub const PREORDER_DISCOUNT: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),

    #[error("product {0} has no color variants")]
    NoColorVariants(String),
}

/// A named presentation of a product (swatch + image set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariant {
    /// Display name (e.g., "Pink").
    pub name: String,
    /// CSS background used to draw the swatch.
    pub gradient: String,
    /// Images shown when this color is selected.
    pub images: Vec<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: String,
    pub name: String,
    pub price: Price,
    pub pre_order: bool,
    pub images: Vec<String>,
    pub colors: Vec<ColorVariant>,
}

impl Product {
    /// Look up a color variant by its display name.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&ColorVariant> {
        self.colors.iter().find(|c| c.name == name)
    }

    /// Total charged for a pre-order of `quantity` units.
    ///
    /// Applies [`PREORDER_DISCOUNT`] and rounds to cents. Returns `None` if
    /// the multiplication overflows.
    #[must_use]
    pub fn preorder_total(&self, quantity: u32) -> Option<Price> {
        self.price
            .checked_times(quantity)
            .map(|subtotal| subtotal.discounted(PREORDER_DISCOUNT))
    }
}

/// In-memory product catalog.
///
/// Cheap to clone; the product list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Build a catalog from a product list, enforcing that slugs are unique
    /// and that every product has at least one color variant.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSlug` or `CatalogError::NoColorVariants`.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
            if product.colors.is_empty() {
                return Err(CatalogError::NoColorVariants(product.slug.clone()));
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// products violate the catalog invariants.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        let catalog = Self::from_products(products)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The built-in Trailhead product line.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: Arc::new(builtin_products()),
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by its slug.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Find a product by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Built-in products
// =============================================================================

fn color(name: &str, gradient: &str, images: &[&str]) -> ColorVariant {
    ColorVariant {
        name: name.to_string(),
        gradient: gradient.to_string(),
        images: images.iter().map(ToString::to_string).collect(),
    }
}

fn product(slug: &str, name: &str, dollars: i64, colors: Vec<ColorVariant>) -> Product {
    let images = colors
        .iter()
        .flat_map(|c| c.images.iter().cloned())
        .collect();
    Product {
        slug: slug.to_string(),
        name: name.to_string(),
        price: Price::usd(Decimal::from(dollars)),
        pre_order: true,
        images,
        colors,
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product(
            "trailblazer-fleece",
            "Trailblazer Fleece",
            110,
            vec![
                color(
                    "Pink",
                    "linear-gradient(135deg, #ff9a9e 0%, #fad0c4 100%)",
                    &["/images/pink-fleece-bg.png"],
                ),
                color(
                    "Polka",
                    "linear-gradient(135deg, #f5f5f5 0%, #e0e0e0 100%)",
                    &["/images/polka-fleece-bg.png"],
                ),
                color(
                    "Yellow",
                    "linear-gradient(135deg, #ffeaa7 0%, #fdcb6e 100%)",
                    &["/images/yellow-fleece-bg.png"],
                ),
            ],
        ),
        product(
            "trail-capri",
            "Trail Capri",
            80,
            vec![
                color(
                    "White",
                    "linear-gradient(135deg, #ffffff 0%, #f5f5f5 100%)",
                    &["/images/white-pants.png"],
                ),
                color(
                    "Brown",
                    "linear-gradient(135deg, #d7ccc8 0%, #a1887f 100%)",
                    &["/images/brown-pants-bg.png"],
                ),
            ],
        ),
        product(
            "summit-pant",
            "Summit Pant",
            90,
            vec![
                color(
                    "Olive",
                    "linear-gradient(135deg, #a5b68d 0%, #7d8f69 100%)",
                    &["/images/olive-pants-bg.png"],
                ),
                color(
                    "Gray",
                    "linear-gradient(135deg, #bdbdbd 0%, #9e9e9e 100%)",
                    &["/images/gray-pants-bg.png"],
                ),
            ],
        ),
        product(
            "horizon-shorts",
            "Horizon Shorts",
            60,
            vec![color(
                "Yellow",
                "linear-gradient(135deg, #ffeaa7 0%, #fdcb6e 100%)",
                &["/images/yellow-shorts-bg.png"],
            )],
        ),
        product(
            "carabiner",
            "Carabiner",
            12,
            vec![color(
                "Default",
                "linear-gradient(135deg, #e0e0e0 0%, #bdbdbd 100%)",
                &["/images/carabiner.png"],
            )],
        ),
    ]
}
