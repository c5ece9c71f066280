//! Backend response types.
//!
//! A backend answers every request with an [`LlmResponse`]: the text it
//! produced, any tool calls it wants executed, and bookkeeping (token usage,
//! why it stopped, and which backend/model served it).
//!
//! Responses are serialized verbatim into the response cache, so every field
//! round-trips through JSON.

use crate::core::backend::BackendId;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of response.
    Stop,
    /// The model wants tools executed.
    ToolCalls,
    /// Hit the token limit; the text may be truncated.
    Length,
    /// Backend-specific stop reason.
    Other(String),
}

impl FinishReason {
    /// Map a backend's raw stop reason onto the shared vocabulary.
    ///
    /// ```
    /// use huddle_domain::FinishReason;
    ///
    /// assert_eq!(FinishReason::from_raw("end_turn"), FinishReason::Stop);
    /// assert_eq!(FinishReason::from_raw("tool_use"), FinishReason::ToolCalls);
    /// assert_eq!(FinishReason::from_raw("max_tokens"), FinishReason::Length);
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "stop" | "end_turn" | "stop_sequence" => FinishReason::Stop,
            "tool_calls" | "tool_use" | "function_call" => FinishReason::ToolCalls,
            "length" | "max_tokens" => FinishReason::Length,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Token accounting reported by a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// A backend's answer to one [`LlmRequest`](super::request::LlmRequest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Text produced by the model (may be empty when only tools were requested).
    pub content: String,
    /// Tool calls requested by the model, keyed on backend-safe names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Backend that produced this response.
    pub backend_id: BackendId,
    /// Model identifier reported by (or configured for) the backend.
    pub model_id: String,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(
        backend_id: BackendId,
        model_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
            backend_id,
            model_id: model_id.into(),
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.finish_reason = Some(FinishReason::ToolCalls);
        self.tool_calls = tool_calls;
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Returns `true` if the response contains any tool call requests.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
