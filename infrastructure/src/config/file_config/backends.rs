//! Backend declarations from TOML (`[[backends]]` array)

use serde::{Deserialize, Serialize};

/// One LLM backend.
///
/// # Example
///
/// ```toml
/// [[backends]]
/// id = "claude"
/// kind = "anthropic"
/// model = "claude-sonnet-4-5"
/// api_key_env = "ANTHROPIC_API_KEY"
///
/// [[backends]]
/// id = "local"
/// kind = "openai"
/// model = "llama3.1"
/// base_url = "http://localhost:11434/v1"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Identifier used by `[router]` and `--backend`
    pub id: String,
    /// Wire protocol: "openai" or "anthropic"
    pub kind: String,
    /// Model name sent with every request
    pub model: String,
    /// API base URL (defaults per kind)
    pub base_url: Option<String>,
    /// Environment variable holding the API key (defaults per kind)
    pub api_key_env: Option<String>,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Overrides `[router] backend_timeout_seconds` for this backend
    pub timeout_seconds: Option<u64>,
}

impl FileBackendConfig {
    /// API key from `api_key`, or else from the configured environment variable.
    pub fn resolve_api_key(&self, default_env: &str) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let env = self.api_key_env.as_deref().unwrap_or(default_env);
        std::env::var(env).ok().filter(|k| !k.is_empty())
    }
}
