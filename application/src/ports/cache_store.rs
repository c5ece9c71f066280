//! Cache store port
//!
//! A raw key/value store with per-entry TTL. The application layer wraps it
//! in [`ResponseCache`](crate::use_cases::response_cache::ResponseCache),
//! which turns every failure into a miss or a no-op.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a cache store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Key/value store with expiry
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store an entry that expires after `ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
