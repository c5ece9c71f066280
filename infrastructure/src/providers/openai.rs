//! OpenAI-compatible chat completions backend.
//!
//! Serves OpenAI itself and any server speaking the same protocol
//! (Ollama, vLLM, LM Studio, gateways). Tool calls arrive with their
//! arguments as a JSON-encoded string.

use super::http::{build_client, endpoint, read_json, transport_error};
use async_trait::async_trait;
use huddle_application::{BackendAdapter, BackendError};
use huddle_domain::{
    BackendId, FinishReason, LlmRequest, LlmResponse, ToolCall, ToolDescriptor, Usage,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiBackend {
    id: BackendId,
    model: String,
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl OpenAiBackend {
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

    /// Local compatible servers often need no key; the header is omitted then.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(&self, request: &LlmRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        if request.has_tools() {
            let tools: Vec<Value> = request.tools.iter().map(tool_to_openai).collect();
            body["tools"] = json!(tools);
        }

        body
    }

    fn parse_response(&self, body: Value) -> Result<LlmResponse, BackendError> {
        let response: ChatCompletion = serde_json::from_value(body)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("response has no choices".into()))?;

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .iter()
            .map(|call| ToolCall::from_arguments(&call.function.name, &call.function.arguments))
            .collect();

        let mut result = LlmResponse::from_text(
            self.id.clone(),
            response.model.unwrap_or_else(|| self.model.clone()),
            choice.message.content.unwrap_or_default(),
        );
        if !tool_calls.is_empty() {
            result = result.with_tool_calls(tool_calls);
        }
        if let Some(reason) = choice.finish_reason.as_deref() {
            result.finish_reason = Some(FinishReason::from_raw(reason));
        }
        if let Some(usage) = response.usage {
            result = result.with_usage(Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            });
        }
        Ok(result)
    }
}

fn tool_to_openai(tool: &ToolDescriptor) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.input_schema,
        }
    })
}

#[async_trait]
impl BackendAdapter for OpenAiBackend {
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
        let url = endpoint(&self.base_url, "chat/completions");
        debug!(backend = %self.id, "POST {}", url);

        let mut http = self.client.post(&url).json(&self.build_request_body(request));
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(transport_error)?;
        let body = read_json(response).await?;
        self.parse_response(body)
    }
}

// ==================== Wire types ====================

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::Message;

    fn backend() -> OpenAiBackend {
        OpenAiBackend::new("openai", "gpt-4o-mini")
    }

    #[test]
    fn test_request_body_keeps_system_and_tools() {
        let request = LlmRequest::new(vec![
            Message::system("You are an analyst."),
            Message::user("Start Kelce?"),
        ])
        .with_tools(vec![ToolDescriptor::new(
            "players_search",
            "Search players",
            json!({"type": "object", "properties": {"query": {"type": "string"}}, "required": ["query"]}),
        )]);

        let body = backend().build_request_body(&request);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Start Kelce?");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "players_search");
        assert_eq!(body["tools"][0]["function"]["parameters"]["required"][0], "query");
    }

    #[test]
    fn test_request_body_omits_empty_tools() {
        let body = backend().build_request_body(&LlmRequest::new(vec![Message::user("hi")]));
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_parse_text_response() {
        let body = json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "message": { "role": "assistant", "content": "Start him." },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        });

        let response = backend().parse_response(body).unwrap();
        assert_eq!(response.content, "Start him.");
        assert_eq!(response.model_id, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.map(|u| u.total()), Some(15));
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn test_parse_tool_calls_with_string_arguments() {
        let body = json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "league_get_current_week", "arguments": "{\"season\":2025}" }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });

        let response = backend().parse_response(body).unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.model_id, "gpt-4o-mini");
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
        assert_eq!(
            response.tool_calls,
            vec![ToolCall::new("league_get_current_week").with_param("season", 2025)]
        );
    }

    #[test]
    fn test_parse_rejects_missing_choices() {
        let error = backend().parse_response(json!({ "choices": [] })).unwrap_err();
        assert!(matches!(error, BackendError::MalformedResponse(_)));
    }
}
