//! Advisory response cache.
//!
//! Wraps a [`CacheStore`] so that caching can never break a request: store
//! errors and undecodable payloads are logged and read as a miss, failed
//! writes are logged and ignored.

use crate::ports::cache_store::CacheStore;
use huddle_domain::{BackendId, LlmRequest, LlmResponse};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const KEY_PREFIX: &str = "huddle:chat:";

/// Fields that identify a cacheable exchange.
#[derive(Serialize)]
struct KeyMaterial<'a> {
    messages: &'a [huddle_domain::Message],
    max_tokens: u32,
    temperature: f32,
    backend: &'a str,
}

/// Stable cache key for a request routed to `backend`.
///
/// `None` means no specific backend was chosen and the router decides.
pub fn cache_key(request: &LlmRequest, backend: Option<&BackendId>) -> String {
    let material = KeyMaterial {
        messages: &request.messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        backend: backend.map(BackendId::as_str).unwrap_or("auto"),
    };
    // Serializing plain structs of strings and numbers cannot fail.
    let bytes = serde_json::to_vec(&material).unwrap_or_default();
    format!("{}{}", KEY_PREFIX, hex::encode(Sha256::digest(&bytes)))
}

pub struct ResponseCache {
    store: Option<Arc<dyn CacheStore>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            store: Some(store),
            ttl,
        }
    }

    /// A cache where every lookup misses and every write is dropped.
    pub fn disabled() -> Self {
        Self {
            store: None,
            ttl: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<LlmResponse> {
        let store = self.store.as_ref()?;
        let raw = match store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache lookup failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(response) => {
                debug!("Cache hit for {}", key);
                Some(response)
            }
            Err(e) => {
                warn!("Discarding malformed cache entry {}: {}", key, e);
                None
            }
        }
    }

    pub async fn put(&self, key: &str, response: &LlmResponse) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let payload = match serde_json::to_string(response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize response for cache: {}", e);
                return;
            }
        };
        if let Err(e) = store.put(key, payload, self.ttl).await {
            warn!("Cache write failed, continuing without cache: {}", e);
        }
    }
}
