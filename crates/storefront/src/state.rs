//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::preorders::{JsonFileStore, PreorderService};

/// Error building the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the pre-order service, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    preorders: PreorderService<JsonFileStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the catalog (the built-in one unless `catalog_path` is set) and
    /// opens the pre-order file at `preorders_path`. An unreadable pre-order
    /// file is logged and surfaces per request; it does not stop startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is invalid.
    pub async fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };

        let store = JsonFileStore::new(&config.preorders_path);
        let preorders = PreorderService::new(store, catalog.clone()).await;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                preorders,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the pre-order service.
    #[must_use]
    pub fn preorders(&self) -> &PreorderService<JsonFileStore> {
        &self.inner.preorders
    }
}
