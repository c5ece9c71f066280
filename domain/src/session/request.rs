//! Backend request

use super::message::{Message, Role};
use crate::core::error::DomainError;
use crate::tool::entities::ToolDescriptor;
use serde::{Deserialize, Serialize};

/// Default completion budget when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A conversation plus the tools and sampling limits for one backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    /// Add tools that are not already present (matched by name).
    pub fn merge_tools<'a>(&mut self, tools: impl IntoIterator<Item = &'a ToolDescriptor>) {
        for tool in tools {
            if !self.tools.iter().any(|t| t.name == tool.name) {
                self.tools.push(tool.clone());
            }
        }
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// Check the request can be sent at all.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.messages.is_empty() {
            return Err(DomainError::EmptyConversation);
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(DomainError::InvalidRequest(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(DomainError::InvalidRequest(
                "max_tokens cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the last turn comes from the user.
    pub fn ends_with_user(&self) -> bool {
        self.messages.last().map(|m| m.role) == Some(Role::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, "desc", json!({"type": "object"}))
    }

    #[test]
    fn test_defaults() {
        let request = LlmRequest::new(vec![Message::user("hi")]);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert!(!request.has_tools());
        assert!(request.ends_with_user());
    }

    #[test]
    fn test_validate_rejects_empty_conversation() {
        let request = LlmRequest::new(vec![]);
        assert_eq!(request.validate(), Err(DomainError::EmptyConversation));
    }

    #[test]
    fn test_validate_rejects_zero_tokens_and_bad_temperature() {
        let base = LlmRequest::new(vec![Message::user("hi")]);
        assert!(base.clone().with_max_tokens(0).validate().is_err());
        assert!(base.clone().with_temperature(f32::NAN).validate().is_err());
        assert!(base.with_temperature(-1.0).validate().is_err());
    }

    #[test]
    fn test_merge_tools_skips_duplicates() {
        let mut request = LlmRequest::new(vec![Message::user("hi")]).with_tools(vec![tool("a")]);
        let catalog = vec![tool("a"), tool("b")];

        request.merge_tools(&catalog);

        let names: Vec<&str> = request.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
