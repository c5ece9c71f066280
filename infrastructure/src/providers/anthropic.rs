//! Anthropic messages API backend.
//!
//! System messages travel in the top-level `system` field, merged in order,
//! and the conversation always ends with a user turn.

use super::http::{build_client, endpoint, read_json, transport_error};
use async_trait::async_trait;
use huddle_application::{BackendAdapter, BackendError};
use huddle_domain::session::message::split_system_prompt;
use huddle_domain::{
    BackendId, FinishReason, LlmRequest, LlmResponse, ToolCall, ToolDescriptor, Usage,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Anthropic API version header.
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    id: BackendId,
    model: String,
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl AnthropicBackend {
    pub fn new(id: impl Into<BackendId>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
            client: build_client(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(&self, request: &LlmRequest) -> Value {
        let (system, turns) = split_system_prompt(&request.messages);

        let messages: Vec<Value> = turns
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": messages,
        });

        if let Some(system) = system {
            body["system"] = json!(system);
        }

        if request.has_tools() {
            let tools: Vec<Value> = request.tools.iter().map(tool_to_anthropic).collect();
            body["tools"] = json!(tools);
        }

        body
    }

    fn parse_response(&self, body: Value) -> Result<LlmResponse, BackendError> {
        let response: MessagesResponse = serde_json::from_value(body)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        let mut text = Vec::new();
        let mut tool_calls = Vec::new();
        // Block types other than text and tool_use (e.g. thinking) are skipped.
        for block in &response.content {
            match block.get("type").and_then(Value::as_str) {
                Some("text") => {
                    if let Some(t) = block.get("text").and_then(Value::as_str) {
                        text.push(t.to_string());
                    }
                }
                Some("tool_use") => {
                    if let Some(name) = block.get("name").and_then(Value::as_str) {
                        let input = block.get("input").cloned().unwrap_or(Value::Null);
                        tool_calls.push(ToolCall::from_arguments(name, &input));
                    }
                }
                _ => {}
            }
        }

        let mut result = LlmResponse::from_text(
            self.id.clone(),
            response.model.unwrap_or_else(|| self.model.clone()),
            text.join("\n"),
        );
        if !tool_calls.is_empty() {
            result = result.with_tool_calls(tool_calls);
        }
        if let Some(reason) = response.stop_reason.as_deref() {
            result.finish_reason = Some(FinishReason::from_raw(reason));
        }
        if let Some(usage) = response.usage {
            result = result.with_usage(Usage {
                prompt_tokens: usage.input_tokens,
                completion_tokens: usage.output_tokens,
            });
        }
        Ok(result)
    }
}

fn tool_to_anthropic(tool: &ToolDescriptor) -> Value {
    json!({
        "name": tool.name,
        "description": tool.description,
        "input_schema": tool.input_schema,
    })
}

#[async_trait]
impl BackendAdapter for AnthropicBackend {
    fn id(&self) -> &BackendId {
        &self.id
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, BackendError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            BackendError::NotConfigured(format!("no API key for backend '{}'", self.id))
        })?;

        let url = endpoint(&self.base_url, "v1/messages");
        debug!(backend = %self.id, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_request_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let body = read_json(response).await?;
        self.parse_response(body)
    }
}

// ==================== Wire types ====================

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<Value>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}
