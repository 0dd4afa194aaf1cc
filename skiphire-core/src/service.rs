//! High-level service facade combining the catalog backend and the transform.

use std::sync::Arc;

use tracing::{debug, info};

use crate::model::{CatalogQuery, SkipOption};
use crate::ports::{CatalogError, CatalogPort};
use crate::transform::transform_all;

/// Public entry point for loading display-ready skip catalogs.
pub struct SkipHireService {
    port: Arc<dyn CatalogPort>,
}

impl SkipHireService {
    /// Create a new service bound to the provided catalog backend.
    #[must_use]
    pub fn new(port: Arc<dyn CatalogPort>) -> Self {
        Self { port }
    }

    /// Fetch the catalog for a location and transform it for display.
    ///
    /// Issues exactly one backend request and never retries. An empty catalog is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the query is blank, the backend call fails, or any record
    /// cannot be priced.
    pub async fn fetch_catalog(&self, query: &CatalogQuery) -> Result<Vec<SkipOption>, CatalogError> {
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery("postcode and area must not be blank"));
        }

        debug!(backend = self.port.name(), %query, "fetching skip catalog");
        let raw = self.port.raw_catalog(query).await?;
        let options = transform_all(&raw)?;
        info!(count = options.len(), %query, "skip catalog ready");
        Ok(options)
    }
}
