//! Run Advice use case.
//!
//! Builds a minimal conversation for one advice kind, routes it through the
//! [`RequestRouter`] and sanitizes the answer into a typed [`Advice`].
//! Whatever the backend writes, the caller receives a fully-populated result.

use crate::use_cases::route_request::{RequestRouter, RouterError};
use huddle_domain::util::truncate_str;
use huddle_domain::{
    Advice, AdviceKind, BackendId, DomainError, LlmRequest, Message, ToolCall, Usage,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const ANALYST_PROMPT: &str = "You are a fantasy football analyst. \
Use the available tools when you need current player, roster or schedule data. \
Answer with a single JSON object and nothing else, using exactly these fields:";

/// Input for the [`RunAdviceUseCase`].
#[derive(Debug, Clone)]
pub struct AdviceInput {
    pub kind: AdviceKind,
    pub question: String,
    /// Free-form league/roster context supplied by the caller.
    pub context: Option<String>,
    pub preferred_backend: Option<BackendId>,
    pub enable_tools: bool,
}

impl AdviceInput {
    pub fn new(kind: AdviceKind, question: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            context: None,
            preferred_backend: None,
            enable_tools: true,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_preferred_backend(mut self, backend: impl Into<BackendId>) -> Self {
        self.preferred_backend = Some(backend.into());
        self
    }

    pub fn with_tools_enabled(mut self, enabled: bool) -> Self {
        self.enable_tools = enabled;
        self
    }
}

/// Sanitized advice plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceOutput {
    pub advice: Advice,
    pub backend_id: BackendId,
    pub model_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// True when the backend text could not be decoded at all.
    pub used_fallback: bool,
}

pub struct RunAdviceUseCase {
    router: Arc<RequestRouter>,
}

impl RunAdviceUseCase {
    pub fn new(router: Arc<RequestRouter>) -> Self {
        Self { router }
    }

    /// Conversation sent to the backend for `input`.
    pub fn build_request(&self, input: &AdviceInput) -> Result<LlmRequest, DomainError> {
        let question = input.question.trim();
        if question.is_empty() {
            return Err(DomainError::InvalidRequest(
                "question cannot be empty".to_string(),
            ));
        }

        let mut messages = vec![Message::system(format!(
            "{}\n{}",
            ANALYST_PROMPT,
            input.kind.schema_hint()
        ))];
        if let Some(context) = input.context.as_deref().filter(|c| !c.trim().is_empty()) {
            messages.push(Message::system(format!("League context:\n{}", context.trim())));
        }
        messages.push(Message::user(question));

        let config = self.router.config();
        Ok(LlmRequest::new(messages)
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature))
    }

    pub async fn execute(&self, input: AdviceInput) -> Result<AdviceOutput, RouterError> {
        info!(
            kind = %input.kind,
            "Requesting advice: {}",
            truncate_str(&input.question, 100)
        );

        let request = self.build_request(&input)?;
        let response = self
            .router
            .chat(request, input.preferred_backend.as_ref(), input.enable_tools)
            .await?;

        let sanitized = Advice::sanitize(input.kind, &response.content);
        if sanitized.used_fallback() {
            warn!(
                backend = %response.backend_id,
                "Backend answer had no usable JSON; returning fallback {} advice",
                input.kind
            );
        }

        Ok(AdviceOutput {
            used_fallback: sanitized.used_fallback(),
            advice: sanitized.value,
            backend_id: response.backend_id,
            model_id: response.model_id,
            tool_calls: response.tool_calls,
            usage: response.usage,
        })
    }
}
