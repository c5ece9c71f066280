//! Router configuration from TOML (`[router]` section)

use serde::{Deserialize, Serialize};

/// Raw router configuration from TOML
///
/// # Example
///
/// ```toml
/// [router]
/// default_backend = "openai"
/// fallbacks = ["claude", "local"]
/// backend_timeout_seconds = 60
/// max_tokens = 2048
/// temperature = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    /// Backend tried first when the caller has no preference
    pub default_backend: Option<String>,
    /// Backends tried after the default, in order
    pub fallbacks: Vec<String>,
    /// Deadline for each backend call (per-backend `timeout_seconds` overrides)
    pub backend_timeout_seconds: u64,
    /// Response token limit for requests built by huddle
    pub max_tokens: u32,
    /// Sampling temperature for requests built by huddle
    pub temperature: f32,
}

impl Default for FileRouterConfig {
    fn default() -> Self {
        Self {
            default_backend: None,
            fallbacks: Vec::new(),
            backend_timeout_seconds: 60,
            max_tokens: 2048,
            temperature: 0.3,
        }
    }
}
