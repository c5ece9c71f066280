//! Tool domain value objects: result and error types
//!
//! Every tool call produces exactly one [`ToolResult`]. Failures never
//! propagate as `Err`: they are captured as an error-shaped result so that
//! one broken tool cannot abort the rest of a tool round.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error that occurred while invoking a tool.
///
/// | Code | Description |
/// |------|-------------|
/// | `TRANSPORT` | Tool service unreachable or returned a non-2xx status |
/// | `RPC_ERROR` | Tool service answered with a JSON-RPC `error` object |
/// | `MALFORMED_RESPONSE` | Response body was neither `result` nor `error` |
/// | `TIMEOUT` | The call exceeded its deadline |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "TIMEOUT", "RPC_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new("TRANSPORT", message)
    }

    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::new("RPC_ERROR", format!("{} (code {})", message.into(), code))
    }

    /// Service error reply that carries no numeric code.
    pub fn rpc_message(message: impl Into<String>) -> Self {
        Self::new("RPC_ERROR", message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_RESPONSE", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Outcome of one tool call: either content or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Backend-safe name of the tool that was called
    pub tool_name: String,
    /// Result payload (for successful calls)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Error information (for failed calls)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, content: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: Some(content),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// One-line rendering used when folding results back into a conversation.
    pub fn summary(&self) -> String {
        match (&self.error, &self.content) {
            (Some(error), _) => format!("ERROR: {}", error.message),
            (None, Some(Value::String(text))) => text.clone(),
            (None, Some(value)) => value.to_string(),
            (None, None) => "null".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_summary_is_compact_json() {
        let result = ToolResult::success("fantasy_get_current_week", json!({"week": 14}));
        assert!(!result.is_error());
        assert_eq!(result.summary(), r#"{"week":14}"#);
    }

    #[test]
    fn test_string_content_is_not_quoted() {
        let result = ToolResult::success("notes", json!("plain text"));
        assert_eq!(result.summary(), "plain text");
    }

    #[test]
    fn test_failure_summary() {
        let result = ToolResult::failure("x", ToolError::rpc(-32601, "Method not found"));
        assert!(result.is_error());
        assert_eq!(result.error().unwrap().code, "RPC_ERROR");
        assert_eq!(result.summary(), "ERROR: Method not found (code -32601)");
    }

    #[test]
    fn test_rpc_message_has_no_code_suffix() {
        let result = ToolResult::failure("x", ToolError::rpc_message("player not found"));
        assert_eq!(result.error().unwrap().code, "RPC_ERROR");
        assert_eq!(result.summary(), "ERROR: player not found");
    }

    #[test]
    fn test_error_display() {
        let err = ToolError::timeout("players.search");
        assert_eq!(err.to_string(), "[TIMEOUT] Operation timed out: players.search");
    }
}
