//! Request router.
//!
//! The router owns the registered backends, the immutable [`RouterConfig`],
//! the shared tool catalog, the tool executor and the response cache. Each
//! call to [`RequestRouter::chat`]:
//!
//! 1. computes the cache key and returns a cached response on hit
//! 2. merges the current catalog into the request when tools are enabled
//! 3. tries every candidate backend in [`RequestRouter::candidate_order`]
//! 4. runs at most one tool round against the backend that answered
//! 5. caches and returns the first success
//!
//! When every candidate fails the caller gets
//! [`RouterError::AllBackendsFailed`] carrying the last failure message.

use crate::config::RouterConfig;
use crate::ports::backend::{BackendAdapter, BackendError};
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::use_cases::execute_tools::ToolInvocationExecutor;
use crate::use_cases::response_cache::{ResponseCache, cache_key};
use crate::use_cases::tool_catalog::SharedCatalog;
use huddle_domain::{
    BackendId, DomainError, LlmRequest, LlmResponse, Message, ToolCatalog, ToolResult,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to callers of the router.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("No backends are registered")]
    NoCandidates,

    #[error("All backends failed after {count} attempts; last error: {last_error}", count = .attempts.len())]
    AllBackendsFailed {
        attempts: Vec<BackendId>,
        last_error: String,
    },
}

pub struct RequestRouter {
    /// Registered backends, in registration order.
    backends: Vec<Arc<dyn BackendAdapter>>,
    config: RouterConfig,
    catalog: Arc<SharedCatalog>,
    executor: Option<Arc<ToolInvocationExecutor>>,
    cache: ResponseCache,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl RequestRouter {
    pub fn new(backends: Vec<Arc<dyn BackendAdapter>>, config: RouterConfig) -> Self {
        Self {
            backends,
            config,
            catalog: Arc::new(SharedCatalog::default()),
            executor: None,
            cache: ResponseCache::disabled(),
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    /// Enable tool rounds with the given catalog and executor.
    pub fn with_tools(
        mut self,
        catalog: Arc<SharedCatalog>,
        executor: Arc<ToolInvocationExecutor>,
    ) -> Self {
        self.catalog = catalog;
        self.executor = Some(executor);
        self
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<SharedCatalog> {
        &self.catalog
    }

    pub fn backends(&self) -> &[Arc<dyn BackendAdapter>] {
        &self.backends
    }

    pub fn backend(&self, id: &BackendId) -> Option<&Arc<dyn BackendAdapter>> {
        self.backends.iter().find(|b| b.id() == id)
    }

    /// Whether tool rounds can run at all.
    pub fn tools_available(&self) -> bool {
        self.executor.is_some()
    }

    /// Order in which backends are tried for one request.
    ///
    /// The preferred backend (when registered) comes first, then the
    /// configured default, then the configured fallbacks. Duplicates and
    /// unregistered identifiers are skipped. With nothing configured, every
    /// registered backend is tried in registration order.
    pub fn candidate_order(&self, preferred: Option<&BackendId>) -> Vec<BackendId> {
        let configured = preferred
            .into_iter()
            .chain(self.config.default_backend.as_ref())
            .chain(self.config.fallbacks.iter());

        let mut order: Vec<BackendId> = Vec::new();
        for id in configured {
            if self.backend(id).is_some() && !order.contains(id) {
                order.push(id.clone());
            }
        }

        if order.is_empty() {
            order = self.backends.iter().map(|b| b.id().clone()).collect();
        }
        order
    }

    /// Route one request and return the first successful response.
    pub async fn chat(
        &self,
        mut request: LlmRequest,
        preferred: Option<&BackendId>,
        enable_tools: bool,
    ) -> Result<LlmResponse, RouterError> {
        request.validate()?;

        let key = cache_key(
            &request,
            preferred.or(self.config.default_backend.as_ref()),
        );
        if let Some(cached) = self.cache.get(&key).await {
            info!(backend = %cached.backend_id, "Serving cached response");
            self.exchange_logger
                .log(ExchangeEvent::cache_hit(&key, &cached.backend_id));
            return Ok(cached);
        }

        // Held for the whole request so a concurrent reload cannot change
        // the name mapping between the call and the dispatch.
        let catalog = self.catalog.snapshot();
        let tools_active = enable_tools && self.tools_available();
        if tools_active {
            request.merge_tools(catalog.descriptors());
        }

        let candidates = self.candidate_order(preferred);
        if candidates.is_empty() {
            return Err(RouterError::NoCandidates);
        }

        let mut attempts = Vec::with_capacity(candidates.len());
        let mut last_error = String::new();

        for (position, id) in candidates.iter().enumerate() {
            let Some(backend) = self.backend(id) else {
                continue;
            };
            attempts.push(id.clone());
            self.exchange_logger.log(ExchangeEvent::backend_attempt(
                id,
                position,
                candidates.len(),
            ));
            debug!(backend = %id, "Trying backend {}/{}", position + 1, candidates.len());

            match self
                .attempt(backend.as_ref(), &request, &catalog, tools_active)
                .await
            {
                Ok(response) => {
                    info!(backend = %id, model = %response.model_id, "Backend answered");
                    self.exchange_logger.log(ExchangeEvent::backend_succeeded(
                        id,
                        &response.model_id,
                        response.tool_calls.len(),
                    ));
                    self.cache.put(&key, &response).await;
                    return Ok(response);
                }
                Err(e) => {
                    warn!(backend = %id, "Backend failed: {}", e);
                    self.exchange_logger
                        .log(ExchangeEvent::backend_failed(id, &e.to_string()));
                    last_error = e.to_string();
                }
            }
        }

        Err(RouterError::AllBackendsFailed {
            attempts,
            last_error,
        })
    }

    /// One candidate: initial send, then the tool round when requested.
    async fn attempt(
        &self,
        backend: &dyn BackendAdapter,
        request: &LlmRequest,
        catalog: &ToolCatalog,
        tools_active: bool,
    ) -> Result<LlmResponse, BackendError> {
        let response = self.send(backend, request).await?;

        match &self.executor {
            Some(executor) if tools_active && response.has_tool_calls() => {
                self.tool_round(backend, executor, request, response, catalog)
                    .await
            }
            _ => Ok(response),
        }
    }

    async fn send(
        &self,
        backend: &dyn BackendAdapter,
        request: &LlmRequest,
    ) -> Result<LlmResponse, BackendError> {
        let timeout = backend.timeout().unwrap_or(self.config.backend_timeout);
        tokio::time::timeout(timeout, backend.send(request))
            .await
            .map_err(|_| BackendError::Timeout(timeout.as_secs()))?
    }

    /// Execute the requested tools once and send exactly one follow-up.
    ///
    /// The follow-up response is returned with the executed tool calls
    /// attached. Tool calls requested by the follow-up are dropped.
    async fn tool_round(
        &self,
        backend: &dyn BackendAdapter,
        executor: &ToolInvocationExecutor,
        request: &LlmRequest,
        response: LlmResponse,
        catalog: &ToolCatalog,
    ) -> Result<LlmResponse, BackendError> {
        let results = executor.execute_all(&response.tool_calls, catalog).await;

        let names: Vec<String> = results.iter().map(|r| r.tool_name.clone()).collect();
        let failed = results.iter().filter(|r| r.is_error()).count();
        info!(
            backend = %backend.id(),
            "Tool round: {} calls, {} failed",
            results.len(),
            failed
        );
        self.exchange_logger
            .log(ExchangeEvent::tool_round(backend.id(), &names, failed));

        let mut follow_up = request.clone();
        follow_up
            .messages
            .push(Message::assistant(assistant_turn(&response)));
        follow_up
            .messages
            .push(Message::user(tool_results_turn(&results)));

        let mut final_response = self.send(backend, &follow_up).await?;
        if final_response.has_tool_calls() {
            debug!(
                backend = %backend.id(),
                "Follow-up requested {} more tools; dropped without another round",
                final_response.tool_calls.len()
            );
        }
        final_response.tool_calls = response.tool_calls;
        Ok(final_response)
    }
}

/// Assistant turn echoing the response that requested tools.
fn assistant_turn(response: &LlmResponse) -> String {
    if !response.content.trim().is_empty() {
        return response.content.clone();
    }
    let names: Vec<&str> = response.tool_calls.iter().map(|c| c.name.as_str()).collect();
    format!("Calling tools: {}", names.join(", "))
}

/// Single user turn summarizing every tool result in call order.
fn tool_results_turn(results: &[ToolResult]) -> String {
    let mut text = String::from("Tool results:");
    for result in results {
        text.push_str(&format!("\n- {}: {}", result.tool_name, result.summary()));
    }
    text.push_str("\n\nUse these results to answer the original question.");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::cache_store::{CacheError, CacheStore};
    use crate::ports::tool_service::{DiscoveryError, ToolServicePort};
    use async_trait::async_trait;
    use huddle_domain::{Role, ToolCall, ToolError};
    use serde_json::{Map, Value, json};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockBackend {
        id: BackendId,
        responses: Mutex<VecDeque<Result<LlmResponse, BackendError>>>,
        received: Mutex<Vec<LlmRequest>>,
    }

    impl MockBackend {
        fn new(id: &str, responses: Vec<Result<LlmResponse, BackendError>>) -> Arc<Self> {
            Arc::new(Self {
                id: BackendId::new(id),
                responses: Mutex::new(VecDeque::from(responses)),
                received: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.received.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> LlmRequest {
            self.received.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl BackendAdapter for MockBackend {
        fn id(&self) -> &BackendId {
            &self.id
        }

        fn model_id(&self) -> &str {
            "mock-model"
        }

        async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, BackendError> {
            self.received.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Other("No more responses".to_string())))
        }
    }

    struct StaticToolService {
        results: HashMap<&'static str, Value>,
        invoked: Mutex<Vec<String>>,
    }

    impl StaticToolService {
        fn new(results: &[(&'static str, Value)]) -> Arc<Self> {
            Arc::new(Self {
                results: results.iter().cloned().collect(),
                invoked: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ToolServicePort for StaticToolService {
        async fn fetch_discovery_document(&self) -> Result<Value, DiscoveryError> {
            Err(DiscoveryError::NotConfigured)
        }

        async fn invoke(&self, method: &str, _params: &Map<String, Value>) -> Result<Value, ToolError> {
            self.invoked.lock().unwrap().push(method.to_string());
            self.results
                .get(method)
                .cloned()
                .ok_or_else(|| ToolError::rpc(-32601, "Method not found"))
        }
    }

    #[derive(Default)]
    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl CacheStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: String, _ttl: Duration) -> Result<(), CacheError> {
            self.entries.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingLogger {
        fn types(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(t, _)| t.clone())
                .collect()
        }
    }

    impl ExchangeLogger for RecordingLogger {
        fn log(&self, event: ExchangeEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type.to_string(), event.payload));
        }
    }

    // ==================== Helpers ====================

    fn text(backend: &str, content: &str) -> Result<LlmResponse, BackendError> {
        Ok(LlmResponse::from_text(
            BackendId::new(backend),
            "mock-model",
            content,
        ))
    }

    fn question() -> LlmRequest {
        LlmRequest::new(vec![
            Message::system("You are a fantasy football analyst."),
            Message::user("Who should I start at flex?"),
        ])
    }

    fn router(backends: Vec<Arc<MockBackend>>, config: RouterConfig) -> RequestRouter {
        let backends: Vec<Arc<dyn BackendAdapter>> = backends
            .into_iter()
            .map(|b| b as Arc<dyn BackendAdapter>)
            .collect();
        RequestRouter::new(backends, config)
    }

    fn tool_router(backend: Arc<MockBackend>, service: Arc<StaticToolService>) -> RequestRouter {
        let catalog = ToolCatalog::new().register(
            "toolA",
            "Returns the current week",
            json!({"type": "object", "properties": {}, "required": []}),
        );
        let executor = ToolInvocationExecutor::new(service, Duration::from_secs(5));
        router(
            vec![backend],
            RouterConfig::default().with_default_backend("primary"),
        )
        .with_tools(Arc::new(SharedCatalog::new(catalog)), Arc::new(executor))
    }

    // ==================== Candidate Order ====================

    #[test]
    fn test_candidate_order_preferred_default_fallbacks() {
        let router = router(
            vec![
                MockBackend::new("a", vec![]),
                MockBackend::new("b", vec![]),
                MockBackend::new("c", vec![]),
            ],
            RouterConfig::default()
                .with_default_backend("b")
                .with_fallbacks(["a", "b", "ghost", "c"]),
        );

        let order = router.candidate_order(Some(&BackendId::new("c")));
        assert_eq!(
            order,
            vec![BackendId::new("c"), BackendId::new("b"), BackendId::new("a")]
        );
    }

    #[test]
    fn test_candidate_order_skips_unregistered_preference() {
        let router = router(
            vec![MockBackend::new("a", vec![]), MockBackend::new("b", vec![])],
            RouterConfig::default().with_default_backend("a").with_fallbacks(["b"]),
        );

        let order = router.candidate_order(Some(&BackendId::new("ghost")));
        assert_eq!(order, vec![BackendId::new("a"), BackendId::new("b")]);
    }

    #[test]
    fn test_candidate_order_without_configuration() {
        let router = router(
            vec![MockBackend::new("x", vec![]), MockBackend::new("y", vec![])],
            RouterConfig::default(),
        );
        assert_eq!(
            router.candidate_order(None),
            vec![BackendId::new("x"), BackendId::new("y")]
        );
    }

    // ==================== Fallback ====================

    #[tokio::test]
    async fn test_preferred_backend_only_contacted() {
        let primary = MockBackend::new("primary", vec![text("primary", "Start Achane.")]);
        let secondary = MockBackend::new("secondary", vec![text("secondary", "unused")]);
        let router = router(
            vec![primary.clone(), secondary.clone()],
            RouterConfig::default()
                .with_default_backend("secondary")
                .with_fallbacks(["primary"]),
        );

        let response = router
            .chat(question(), Some(&BackendId::new("primary")), false)
            .await
            .unwrap();

        assert_eq!(response.backend_id, BackendId::new("primary"));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_and_logs_both_attempts() {
        let primary = MockBackend::new(
            "primary",
            vec![Err(BackendError::ConnectionError("refused".to_string()))],
        );
        let secondary = MockBackend::new("secondary", vec![text("secondary", "Sit him.")]);
        let logger = Arc::new(RecordingLogger::default());
        let router = router(
            vec![primary.clone(), secondary.clone()],
            RouterConfig::default()
                .with_default_backend("primary")
                .with_fallbacks(["secondary"]),
        )
        .with_exchange_logger(logger.clone());

        let response = router.chat(question(), None, false).await.unwrap();

        assert_eq!(response.backend_id, BackendId::new("secondary"));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(
            logger.types(),
            vec![
                "backend_attempt",
                "backend_failed",
                "backend_attempt",
                "backend_succeeded"
            ]
        );
    }

    #[tokio::test]
    async fn test_all_backends_fail_reports_last_error() {
        let router = router(
            vec![
                MockBackend::new("a", vec![Err(BackendError::Timeout(30))]),
                MockBackend::new(
                    "b",
                    vec![Err(BackendError::HttpStatus {
                        status: 503,
                        body: "overloaded".to_string(),
                    })],
                ),
            ],
            RouterConfig::default()
                .with_default_backend("a")
                .with_fallbacks(["b"]),
        );

        let error = router.chat(question(), None, false).await.unwrap_err();

        match error {
            RouterError::AllBackendsFailed {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, vec![BackendId::new("a"), BackendId::new("b")]);
                assert!(last_error.contains("503"));
                assert!(last_error.contains("overloaded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_backends_registered() {
        let router = router(vec![], RouterConfig::default());
        let error = router.chat(question(), None, false).await.unwrap_err();
        assert_eq!(error, RouterError::NoCandidates);
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected_before_backend() {
        let backend = MockBackend::new("a", vec![text("a", "hi")]);
        let router = router(vec![backend.clone()], RouterConfig::default());

        let error = router
            .chat(LlmRequest::new(vec![]), None, false)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            RouterError::InvalidRequest(DomainError::EmptyConversation)
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_timeout_moves_to_next_candidate() {
        struct StalledBackend {
            id: BackendId,
        }

        #[async_trait]
        impl BackendAdapter for StalledBackend {
            fn id(&self) -> &BackendId {
                &self.id
            }

            fn model_id(&self) -> &str {
                "stalled"
            }

            async fn send(&self, _request: &LlmRequest) -> Result<LlmResponse, BackendError> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(BackendError::Other("unreachable".to_string()))
            }
        }

        let stalled: Arc<dyn BackendAdapter> = Arc::new(StalledBackend {
            id: BackendId::new("stalled"),
        });
        let healthy = MockBackend::new("healthy", vec![text("healthy", "ok")]);
        let router = RequestRouter::new(
            vec![stalled, healthy.clone() as Arc<dyn BackendAdapter>],
            RouterConfig::default()
                .with_default_backend("stalled")
                .with_fallbacks(["healthy"])
                .with_backend_timeout(Duration::from_secs(5)),
        );

        let response = router.chat(question(), None, false).await.unwrap();
        assert_eq!(response.backend_id, BackendId::new("healthy"));
    }

    // ==================== Cache ====================

    #[tokio::test]
    async fn test_cache_hit_short_circuits() {
        let backend = MockBackend::new("primary", vec![text("primary", "Start him.")]);
        let logger = Arc::new(RecordingLogger::default());
        let router = router(
            vec![backend.clone()],
            RouterConfig::default().with_default_backend("primary"),
        )
        .with_cache(ResponseCache::new(
            Arc::new(MapStore::default()),
            Duration::from_secs(60),
        ))
        .with_exchange_logger(logger.clone());

        let first = router.chat(question(), None, false).await.unwrap();
        let second = router.chat(question(), None, false).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.calls(), 1);
        assert_eq!(logger.types().last().map(String::as_str), Some("cache_hit"));
    }

    // ==================== Tool Round ====================

    #[tokio::test]
    async fn test_single_tool_round() {
        let backend = MockBackend::new(
            "primary",
            vec![
                Ok(
                    LlmResponse::from_text(BackendId::new("primary"), "mock-model", "")
                        .with_tool_calls(vec![ToolCall::new("toolA")]),
                ),
                text("primary", "It is week 14, start your studs."),
            ],
        );
        let service = StaticToolService::new(&[("toolA", json!({"week": 14}))]);
        let router = tool_router(backend.clone(), service.clone());

        let response = router.chat(question(), None, true).await.unwrap();

        assert_eq!(backend.calls(), 2);
        assert_eq!(*service.invoked.lock().unwrap(), vec!["toolA".to_string()]);
        assert_eq!(response.content, "It is week 14, start your studs.");
        assert_eq!(response.tool_calls, vec![ToolCall::new("toolA")]);

        let initial = backend.request(0);
        assert!(initial.tools.iter().any(|t| t.name == "toolA"));

        let follow_up = backend.request(1);
        assert_eq!(follow_up.messages.len(), initial.messages.len() + 2);
        let assistant = &follow_up.messages[follow_up.messages.len() - 2];
        assert_eq!(assistant.role, Role::Assistant);
        let summary = follow_up.messages.last().unwrap();
        assert_eq!(summary.role, Role::User);
        assert!(summary.content.contains("toolA"));
        assert!(summary.content.contains(r#"{"week":14}"#));
    }

    #[tokio::test]
    async fn test_failed_tool_reported_in_follow_up() {
        let backend = MockBackend::new(
            "primary",
            vec![
                Ok(
                    LlmResponse::from_text(BackendId::new("primary"), "mock-model", "Checking.")
                        .with_tool_calls(vec![ToolCall::new("missing_tool")]),
                ),
                text("primary", "Could not fetch data."),
            ],
        );
        let router = tool_router(backend.clone(), StaticToolService::new(&[]));

        router.chat(question(), None, true).await.unwrap();

        let summary = backend.request(1).messages.last().unwrap().content.clone();
        assert!(summary.contains("missing_tool: ERROR: Method not found"));
    }

    #[tokio::test]
    async fn test_second_round_calls_dropped_and_executed_calls_kept() {
        let backend = MockBackend::new(
            "primary",
            vec![
                Ok(
                    LlmResponse::from_text(BackendId::new("primary"), "mock-model", "")
                        .with_tool_calls(vec![ToolCall::new("toolA")]),
                ),
                Ok(
                    LlmResponse::from_text(BackendId::new("primary"), "mock-model", "")
                        .with_tool_calls(vec![ToolCall::new("toolA").with_param("week", 15)]),
                ),
            ],
        );
        let service = StaticToolService::new(&[("toolA", json!({"week": 14}))]);
        let router = tool_router(backend.clone(), service.clone());

        let response = router.chat(question(), None, true).await.unwrap();

        assert_eq!(backend.calls(), 2);
        assert_eq!(service.invoked.lock().unwrap().len(), 1);
        assert_eq!(response.tool_calls, vec![ToolCall::new("toolA")]);
    }

    #[tokio::test]
    async fn test_tools_disabled_skips_round() {
        let backend = MockBackend::new(
            "primary",
            vec![Ok(
                LlmResponse::from_text(BackendId::new("primary"), "mock-model", "Need data.")
                    .with_tool_calls(vec![ToolCall::new("toolA")]),
            )],
        );
        let service = StaticToolService::new(&[("toolA", json!({"week": 14}))]);
        let router = tool_router(backend.clone(), service.clone());

        let response = router.chat(question(), None, false).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert!(service.invoked.lock().unwrap().is_empty());
        assert!(backend.request(0).tools.is_empty());
        assert_eq!(response.tool_calls.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_follow_up_falls_back() {
        let primary = MockBackend::new(
            "primary",
            vec![
                Ok(
                    LlmResponse::from_text(BackendId::new("primary"), "mock-model", "")
                        .with_tool_calls(vec![ToolCall::new("toolA")]),
                ),
                Err(BackendError::MalformedResponse("truncated".to_string())),
            ],
        );
        let secondary = MockBackend::new("secondary", vec![text("secondary", "Start him.")]);
        let catalog = ToolCatalog::new().register("toolA", "", json!({"type": "object"}));
        let executor = ToolInvocationExecutor::new(
            StaticToolService::new(&[("toolA", json!({"week": 14}))]),
            Duration::from_secs(5),
        );
        let router = router(
            vec![primary.clone(), secondary.clone()],
            RouterConfig::default()
                .with_default_backend("primary")
                .with_fallbacks(["secondary"]),
        )
        .with_tools(Arc::new(SharedCatalog::new(catalog)), Arc::new(executor));

        let response = router.chat(question(), None, true).await.unwrap();

        assert_eq!(response.backend_id, BackendId::new("secondary"));
        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 1);
    }
}
