//! Port for structured exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording what the router did
//! with each request (backend attempts, failures, tool rounds, cache hits) to
//! a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable record (JSONL) of every fallback decision.

use huddle_domain::BackendId;
use serde_json::{Value, json};

/// A structured exchange event for logging.
pub struct ExchangeEvent {
    /// Event type identifier (e.g., "backend_attempt", "tool_round").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExchangeEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn cache_hit(key: &str, backend: &BackendId) -> Self {
        Self::new("cache_hit", json!({ "key": key, "backend": backend }))
    }

    pub fn backend_attempt(backend: &BackendId, position: usize, candidates: usize) -> Self {
        Self::new(
            "backend_attempt",
            json!({ "backend": backend, "position": position, "candidates": candidates }),
        )
    }

    pub fn backend_failed(backend: &BackendId, error: &str) -> Self {
        Self::new("backend_failed", json!({ "backend": backend, "error": error }))
    }

    pub fn backend_succeeded(backend: &BackendId, model: &str, tool_calls: usize) -> Self {
        Self::new(
            "backend_succeeded",
            json!({ "backend": backend, "model": model, "tool_calls": tool_calls }),
        )
    }

    pub fn tool_round(backend: &BackendId, tools: &[String], failed: usize) -> Self {
        Self::new(
            "tool_round",
            json!({ "backend": backend, "tools": tools, "failed": failed }),
        )
    }
}

/// Port for logging exchange events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging can
/// never disrupt request handling; implementations swallow write failures.
pub trait ExchangeLogger: Send + Sync {
    /// Record an exchange event.
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
