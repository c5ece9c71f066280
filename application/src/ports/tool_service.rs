//! Tool service port
//!
//! Defines how the application layer reaches the external tool service:
//! fetching its discovery document and invoking one method.

use async_trait::async_trait;
use huddle_domain::ToolError;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure to fetch the discovery document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Tool service unreachable: {0}")]
    Unreachable(String),

    #[error("Discovery endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Discovery document is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Tool discovery is not configured")]
    NotConfigured,
}

/// Port for the external tool service
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolServicePort: Send + Sync {
    /// Fetch the raw discovery document describing available methods.
    async fn fetch_discovery_document(&self) -> Result<Value, DiscoveryError>;

    /// Invoke a method by its original (service-side) name.
    async fn invoke(&self, method: &str, params: &Map<String, Value>) -> Result<Value, ToolError>;

    /// Whether the service answers at all.
    async fn is_healthy(&self) -> bool {
        self.fetch_discovery_document().await.is_ok()
    }
}
