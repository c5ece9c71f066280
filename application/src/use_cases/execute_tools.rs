//! Tool invocation executor.
//!
//! Runs every tool call of a round concurrently against the tool service and
//! returns exactly one [`ToolResult`] per call, in input order. Failures of any
//! kind (transport, JSON-RPC error, deadline) are captured in the result; the
//! executor itself never fails.

use crate::ports::tool_service::ToolServicePort;
use futures::future::join_all;
use huddle_domain::util::truncate_str;
use huddle_domain::{ToolCall, ToolCatalog, ToolError, ToolResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct ToolInvocationExecutor {
    service: Arc<dyn ToolServicePort>,
    timeout: Duration,
}

impl ToolInvocationExecutor {
    pub fn new(service: Arc<dyn ToolServicePort>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn service(&self) -> &Arc<dyn ToolServicePort> {
        &self.service
    }

    /// Execute all calls concurrently.
    ///
    /// Calls are keyed on backend-safe names; `catalog` maps them back to the
    /// identifiers the tool service expects.
    pub async fn execute_all(&self, calls: &[ToolCall], catalog: &ToolCatalog) -> Vec<ToolResult> {
        let futures = calls.iter().map(|call| self.execute_one(call, catalog));
        join_all(futures).await
    }

    async fn execute_one(&self, call: &ToolCall, catalog: &ToolCatalog) -> ToolResult {
        let method = catalog.resolve_original_name(&call.name);
        debug!(
            tool = %call.name,
            method = %method,
            "Invoking tool with {}",
            truncate_str(&call.parameters_value().to_string(), 200)
        );

        let outcome = tokio::time::timeout(
            self.timeout,
            self.service.invoke(method, &call.parameters),
        )
        .await;

        match outcome {
            Ok(Ok(content)) => ToolResult::success(&call.name, content),
            Ok(Err(error)) => {
                warn!(tool = %call.name, "Tool call failed: {}", error);
                ToolResult::failure(&call.name, error)
            }
            Err(_) => {
                warn!(
                    tool = %call.name,
                    "Tool call exceeded {}s deadline",
                    self.timeout.as_secs_f64()
                );
                ToolResult::failure(&call.name, ToolError::timeout(method))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_service::DiscoveryError;
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::sync::Mutex;

    /// Echoes its params back, fails for one method, stalls for another.
    /// A `delay_ms` param delays the answer.
    struct ScriptedToolService {
        failing_method: &'static str,
        stalled_method: &'static str,
        invoked: Mutex<Vec<String>>,
        completed: Mutex<Vec<String>>,
    }

    impl ScriptedToolService {
        fn new() -> Self {
            Self {
                failing_method: "broken.tool",
                stalled_method: "slow.tool",
                invoked: Mutex::new(Vec::new()),
                completed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolServicePort for ScriptedToolService {
        async fn fetch_discovery_document(&self) -> Result<Value, DiscoveryError> {
            Err(DiscoveryError::NotConfigured)
        }

        async fn invoke(&self, method: &str, params: &Map<String, Value>) -> Result<Value, ToolError> {
            self.invoked.lock().unwrap().push(method.to_string());
            if method == self.failing_method {
                return Err(ToolError::rpc(-32000, "upstream exploded"));
            }
            if method == self.stalled_method {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if let Some(delay) = params.get("delay_ms").and_then(Value::as_u64) {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            self.completed.lock().unwrap().push(method.to_string());
            Ok(json!({ "method": method, "params": Value::Object(params.clone()) }))
        }
    }

    fn catalog() -> ToolCatalog {
        let schema = json!({"type": "object", "properties": {}, "required": []});
        ToolCatalog::new()
            .register("stats.weekly", "", schema.clone())
            .register("news.latest", "", schema.clone())
            .register("broken.tool", "", schema.clone())
            .register("injuries.list", "", schema.clone())
            .register("slow.tool", "", schema)
    }

    #[tokio::test]
    async fn test_results_keep_order_and_isolate_failure() {
        let service = Arc::new(ScriptedToolService::new());
        let executor = ToolInvocationExecutor::new(service.clone(), Duration::from_secs(5));

        let calls = vec![
            ToolCall::new("stats_weekly").with_param("week", 14),
            ToolCall::new("news_latest"),
            ToolCall::new("broken_tool"),
            ToolCall::new("injuries_list"),
        ];

        let results = executor.execute_all(&calls, &catalog()).await;

        assert_eq!(results.len(), 4);
        for (index, (call, result)) in calls.iter().zip(&results).enumerate() {
            assert_eq!(result.tool_name, call.name);
            assert_eq!(result.is_error(), index == 2, "unexpected state at {}", index);
        }
        assert_eq!(results[2].error().unwrap().code, "RPC_ERROR");
        assert_eq!(results[0].content.as_ref().unwrap()["params"]["week"], 14);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_follow_call_order_not_completion_order() {
        let service = Arc::new(ScriptedToolService::new());
        let executor = ToolInvocationExecutor::new(service.clone(), Duration::from_secs(5));

        let calls = vec![
            ToolCall::new("stats_weekly").with_param("delay_ms", 300),
            ToolCall::new("news_latest").with_param("delay_ms", 100),
            ToolCall::new("injuries_list"),
        ];

        let results = executor.execute_all(&calls, &catalog()).await;

        assert_eq!(
            *service.completed.lock().unwrap(),
            vec!["injuries.list", "news.latest", "stats.weekly"]
        );
        let names: Vec<&str> = results.iter().map(|r| r.tool_name.as_str()).collect();
        assert_eq!(names, vec!["stats_weekly", "news_latest", "injuries_list"]);
        assert_eq!(
            results[0].content.as_ref().unwrap()["method"],
            "stats.weekly"
        );
        assert_eq!(results[1].content.as_ref().unwrap()["method"], "news.latest");
    }

    #[tokio::test]
    async fn test_dispatches_original_names() {
        let service = Arc::new(ScriptedToolService::new());
        let executor = ToolInvocationExecutor::new(service.clone(), Duration::from_secs(5));

        executor
            .execute_all(&[ToolCall::new("stats_weekly"), ToolCall::new("unmapped")], &catalog())
            .await;

        let mut invoked = service.invoked.lock().unwrap().clone();
        invoked.sort();
        assert_eq!(invoked, vec!["stats.weekly".to_string(), "unmapped".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_becomes_error_result() {
        let service = Arc::new(ScriptedToolService::new());
        let executor = ToolInvocationExecutor::new(service, Duration::from_secs(2));

        let results = executor
            .execute_all(&[ToolCall::new("slow_tool"), ToolCall::new("news_latest")], &catalog())
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].error().unwrap().code, "TIMEOUT");
        assert!(!results[1].is_error());
    }

    #[tokio::test]
    async fn test_empty_round() {
        let executor =
            ToolInvocationExecutor::new(Arc::new(ScriptedToolService::new()), Duration::from_secs(1));
        assert!(executor.execute_all(&[], &catalog()).await.is_empty());
    }
}
