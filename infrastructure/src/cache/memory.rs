//! In-process cache store with per-entry expiry and a capacity bound.

use async_trait::async_trait;
use huddle_application::{CacheError, CacheStore};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    /// `None` when the TTL runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// [`CacheStore`] backed by a `HashMap`.
///
/// Expired entries read as missing and are purged on the next write. When
/// the store is full, the entry closest to expiry is evicted.
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl MemoryCacheStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, including ones that expired but were not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.is_live(now));

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let victim = entries
                .iter()
                .min_by_key(|(_, entry)| (entry.expires_at.is_none(), entry.expires_at))
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                debug!("Cache full, evicting {}", victim);
                entries.remove(&victim);
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now.checked_add(ttl),
            },
        );
        Ok(())
    }
}
