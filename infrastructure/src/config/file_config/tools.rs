//! Tool service configuration from TOML (`[tools]` section)

use serde::{Deserialize, Serialize};

/// Raw tool service configuration from TOML
///
/// # Example
///
/// ```toml
/// [tools]
/// enabled = true
/// discovery_url = "http://localhost:8700/rpc/discover"
/// rpc_url = "http://localhost:8700/rpc"
/// timeout_seconds = 15
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Offer tools to backends at all
    pub enabled: bool,
    /// URL of the discovery document (HTTP GET)
    pub discovery_url: Option<String>,
    /// JSON-RPC endpoint (HTTP POST)
    pub rpc_url: Option<String>,
    /// Deadline for each individual tool call
    pub timeout_seconds: u64,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            discovery_url: None,
            rpc_url: None,
            timeout_seconds: 15,
        }
    }
}

impl FileToolsConfig {
    /// Tools are usable only when enabled and an RPC endpoint is set.
    pub fn is_active(&self) -> bool {
        self.enabled && self.rpc_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}
