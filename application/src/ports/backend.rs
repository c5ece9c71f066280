//! Backend adapter port
//!
//! Defines the single interface every LLM backend is wrapped in. The router
//! holds a map from [`BackendId`] to adapter and never needs to know which
//! concrete service sits behind it.

use async_trait::async_trait;
use huddle_domain::{BackendId, LlmRequest, LlmResponse, Message};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to one backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Backend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("Timeout after {0}s")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

impl BackendError {
    /// Whether the failure happened before the backend produced any answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BackendError::ConnectionError(_) | BackendError::Timeout(_)
        )
    }
}

/// Uniform wrapper around one LLM backend.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Identifier the router and configuration refer to this backend by.
    fn id(&self) -> &BackendId;

    /// Model the backend is configured to use.
    fn model_id(&self) -> &str;

    /// Deadline for one call to this backend, overriding the router default.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Send a request and wait for the complete response.
    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, BackendError>;

    /// Probe the backend with a minimal request.
    ///
    /// Default implementation sends a one-token "ping" and reports whether it
    /// succeeded.
    async fn is_healthy(&self) -> bool {
        let probe = LlmRequest::new(vec![Message::user("ping")]).with_max_tokens(1);
        self.send(&probe).await.is_ok()
    }
}
