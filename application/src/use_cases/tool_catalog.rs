//! Tool catalog discovery and reload.
//!
//! [`discover_catalog`] turns the tool service's discovery document into a
//! [`ToolCatalog`], falling back to the hand-authored minimal catalog when the
//! service is unreachable, misses its deadline, or the document is unusable.
//!
//! [`SharedCatalog`] is the process-wide handle. Readers take an immutable
//! snapshot; [`SharedCatalog::reload`] swaps in a new snapshot without
//! disturbing dispatches that are still holding the old one.

use crate::ports::tool_service::ToolServicePort;
use huddle_domain::ToolCatalog;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{info, warn};

/// Where a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Discovered,
    Fallback,
}

/// Build a catalog from the tool service, or the fallback catalog.
///
/// Discovery that takes longer than `timeout` counts as a failure.
pub async fn discover_catalog(
    service: &dyn ToolServicePort,
    timeout: Duration,
) -> (ToolCatalog, CatalogSource) {
    let document = match tokio::time::timeout(timeout, service.fetch_discovery_document()).await
    {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            warn!("Tool discovery failed, using fallback catalog: {}", e);
            return (ToolCatalog::fallback(), CatalogSource::Fallback);
        }
        Err(_) => {
            warn!(
                "Tool discovery timed out after {:?}, using fallback catalog",
                timeout
            );
            return (ToolCatalog::fallback(), CatalogSource::Fallback);
        }
    };

    match ToolCatalog::from_discovery_document(&document) {
        Ok(catalog) => {
            info!("Discovered {} tools", catalog.len());
            (catalog, CatalogSource::Discovered)
        }
        Err(e) => {
            warn!("{}; using fallback catalog", e);
            (ToolCatalog::fallback(), CatalogSource::Fallback)
        }
    }
}

/// Shared, reloadable handle to the current catalog.
pub struct SharedCatalog {
    current: RwLock<Arc<ToolCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Run discovery once and wrap the result.
    pub async fn discover(service: &dyn ToolServicePort, timeout: Duration) -> Self {
        let (catalog, _) = discover_catalog(service, timeout).await;
        Self::new(catalog)
    }

    /// Immutable view of the current catalog.
    pub fn snapshot(&self) -> Arc<ToolCatalog> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current catalog.
    pub fn replace(&self, catalog: ToolCatalog) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Arc::new(catalog);
    }

    /// Re-run discovery and swap in the result.
    pub async fn reload(&self, service: &dyn ToolServicePort, timeout: Duration) -> CatalogSource {
        let (catalog, source) = discover_catalog(service, timeout).await;
        self.replace(catalog);
        source
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new(ToolCatalog::fallback())
    }
}
