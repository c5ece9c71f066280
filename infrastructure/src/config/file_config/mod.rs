//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion into application types happens in [`FileConfig::to_router_config`].

mod backends;
mod cache;
mod logging;
mod router;
mod tools;

pub use backends::FileBackendConfig;
pub use cache::FileCacheConfig;
pub use logging::FileLoggingConfig;
pub use router::FileRouterConfig;
pub use tools::FileToolsConfig;

use super::validation::{ConfigIssue, ConfigIssueCode};
use crate::providers::ProviderKind;
use huddle_application::RouterConfig;
use huddle_domain::BackendId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Candidate ordering and request defaults
    pub router: FileRouterConfig,
    /// Declared LLM backends
    pub backends: Vec<FileBackendConfig>,
    /// External tool service
    pub tools: FileToolsConfig,
    /// Response cache
    pub cache: FileCacheConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks, in order:
    /// 1. Backend declarations (ids, kinds, timeouts)
    /// 2. Router references to declared backends
    /// 3. Zero timeouts and TTLs
    /// 4. Tool endpoints
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Backends
        if self.backends.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoBackends,
                "no [[backends]] declared; every request will fail",
            ));
        }
        let mut seen = HashSet::new();
        for (index, backend) in self.backends.iter().enumerate() {
            if backend.id.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyBackendId,
                    format!("backends[{}].id is empty", index),
                ));
            } else if !seen.insert(backend.id.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateBackendId {
                        id: backend.id.clone(),
                    },
                    format!("duplicate backend id '{}'", backend.id),
                ));
            }

            if backend.kind.parse::<ProviderKind>().is_err() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("backends[{}].kind", index),
                        value: backend.kind.clone(),
                        valid_values: ProviderKind::all()
                            .iter()
                            .map(|k| k.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "backends[{}].kind: unknown value '{}', expected 'openai' or 'anthropic'",
                        index, backend.kind
                    ),
                ));
            }

            if backend.model.trim().is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("backends[{}].model", index),
                        value: String::new(),
                        valid_values: vec![],
                    },
                    format!("backends[{}].model is empty; the kind's default is used", index),
                ));
            }

            if backend.timeout_seconds == Some(0) {
                issues.push(zero_duration(format!("backends[{}].timeout_seconds", index)));
            }
        }

        // 2. Router references
        let declared: HashSet<&str> = self.backends.iter().map(|b| b.id.as_str()).collect();
        let references = self
            .router
            .default_backend
            .iter()
            .map(|id| ("router.default_backend".to_string(), id))
            .chain(
                self.router
                    .fallbacks
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (format!("router.fallbacks[{}]", i), id)),
            );
        for (field, id) in references {
            if !declared.contains(id.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownBackendReference {
                        field: field.clone(),
                        id: id.clone(),
                    },
                    format!("{}: backend '{}' is not declared and will be skipped", field, id),
                ));
            }
        }

        // 3. Durations
        if self.router.backend_timeout_seconds == 0 {
            issues.push(zero_duration("router.backend_timeout_seconds".to_string()));
        }
        if self.tools.timeout_seconds == 0 {
            issues.push(zero_duration("tools.timeout_seconds".to_string()));
        }
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            issues.push(zero_duration("cache.ttl_seconds".to_string()));
        }

        // 4. Tool endpoints
        if self.tools.enabled && self.tools.rpc_url.as_deref().is_none_or(str::is_empty) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingEndpoint {
                    field: "tools.rpc_url".to_string(),
                },
                "tools.enabled is true but tools.rpc_url is not set; tools are disabled",
            ));
        }

        issues
    }

    /// Application-level router parameters.
    pub fn to_router_config(&self) -> RouterConfig {
        RouterConfig {
            default_backend: self.router.default_backend.as_deref().map(BackendId::from),
            fallbacks: self
                .router
                .fallbacks
                .iter()
                .map(|id| BackendId::from(id.as_str()))
                .collect(),
            backend_timeout: Duration::from_secs(self.router.backend_timeout_seconds),
            tool_timeout: Duration::from_secs(self.tools.timeout_seconds),
            cache_enabled: self.cache.enabled,
            cache_ttl: Duration::from_secs(self.cache.ttl_seconds),
            max_tokens: self.router.max_tokens,
            temperature: self.router.temperature,
        }
    }
}

fn zero_duration(field: String) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::ZeroDuration {
            field: field.clone(),
        },
        format!("{} must be greater than 0", field),
    )
}
