//! Router parameters: candidate ordering, deadlines and cache policy.
//!
//! [`RouterConfig`] is the immutable configuration a
//! [`RequestRouter`](crate::use_cases::route_request::RequestRouter) owns.
//! It is built by the infrastructure config loader from the file sections.

use huddle_domain::BackendId;
use huddle_domain::session::request::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use std::time::Duration;

/// Static routing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Backend tried first when the caller expresses no preference.
    pub default_backend: Option<BackendId>,
    /// Backends tried after the default, in order.
    pub fallbacks: Vec<BackendId>,
    /// Deadline applied to every individual backend call.
    pub backend_timeout: Duration,
    /// Deadline applied to every individual tool call.
    pub tool_timeout: Duration,
    /// Whether successful responses are cached.
    pub cache_enabled: bool,
    /// Lifetime of a cached response.
    pub cache_ttl: Duration,
    /// `max_tokens` used for requests the application builds itself.
    pub max_tokens: u32,
    /// `temperature` used for requests the application builds itself.
    pub temperature: f32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_backend: None,
            fallbacks: Vec::new(),
            backend_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(15),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(300),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl RouterConfig {
    // ==================== Builder Methods ====================

    pub fn with_default_backend(mut self, id: impl Into<BackendId>) -> Self {
        self.default_backend = Some(id.into());
        self
    }

    pub fn with_fallbacks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BackendId>,
    {
        self.fallbacks = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
