//! Response cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};

/// Raw cache configuration from TOML
///
/// # Example
///
/// ```toml
/// [cache]
/// enabled = true
/// ttl_seconds = 300
/// max_entries = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub enabled: bool,
    /// Lifetime of a cached response
    pub ttl_seconds: u64,
    /// Entries kept before the oldest are evicted
    pub max_entries: usize,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 300,
            max_entries: 1024,
        }
    }
}
