//! Backend adapters
//!
//! Each `[[backends]]` entry becomes one [`BackendAdapter`] according to its
//! `kind`. Unknown kinds are reported by config validation and skipped here.

pub mod anthropic;
mod http;
pub mod openai;

use crate::config::{FileBackendConfig, FileConfig};
use anthropic::AnthropicBackend;
use huddle_application::BackendAdapter;
use openai::OpenAiBackend;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Wire protocol a backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn all() -> [ProviderKind; 2] {
        [ProviderKind::OpenAi, ProviderKind::Anthropic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_BASE_URL,
            ProviderKind::Anthropic => anthropic::DEFAULT_BASE_URL,
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_API_KEY_ENV,
            ProviderKind::Anthropic => anthropic::DEFAULT_API_KEY_ENV,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "open-ai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            other => Err(format!("unknown backend kind '{}'", other)),
        }
    }
}

/// Build one adapter per usable `[[backends]]` entry, in declaration order.
pub fn build_backends(config: &FileConfig) -> Vec<Arc<dyn BackendAdapter>> {
    config
        .backends
        .iter()
        .filter_map(|entry| match build_backend(entry) {
            Ok(backend) => Some(backend),
            Err(reason) => {
                warn!("Skipping backend '{}': {}", entry.id, reason);
                None
            }
        })
        .collect()
}

fn build_backend(entry: &FileBackendConfig) -> Result<Arc<dyn BackendAdapter>, String> {
    if entry.id.trim().is_empty() {
        return Err("empty id".to_string());
    }
    let kind: ProviderKind = entry.kind.parse()?;

    let model = if entry.model.trim().is_empty() {
        kind.default_model().to_string()
    } else {
        entry.model.clone()
    };
    let base_url = entry
        .base_url
        .clone()
        .unwrap_or_else(|| kind.default_base_url().to_string());
    let api_key = entry.resolve_api_key(kind.default_api_key_env());
    let timeout = entry
        .timeout_seconds
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    debug!(
        backend = %entry.id,
        kind = %kind,
        model = %model,
        has_key = api_key.is_some(),
        "Registering backend"
    );

    let backend: Arc<dyn BackendAdapter> = match kind {
        ProviderKind::OpenAi => Arc::new(
            OpenAiBackend::new(entry.id.as_str(), model)
                .with_base_url(base_url)
                .with_api_key(api_key)
                .with_timeout(timeout),
        ),
        ProviderKind::Anthropic => Arc::new(
            AnthropicBackend::new(entry.id.as_str(), model)
                .with_base_url(base_url)
                .with_api_key(api_key)
                .with_timeout(timeout),
        ),
    };
    Ok(backend)
}
