//! Check Health use case.
//!
//! Probes every registered backend and the tool service concurrently. Each
//! probe has its own deadline; a probe that runs out of time reports
//! unhealthy without affecting the others.

use crate::ports::backend::BackendAdapter;
use crate::ports::tool_service::ToolServicePort;
use futures::future::join_all;
use huddle_domain::BackendId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Health of every dependency, keyed by backend id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub backends: BTreeMap<BackendId, bool>,
    /// `None` when no tool service is configured.
    pub tool_service: Option<bool>,
}

impl HealthReport {
    /// True when at least one backend answers and the tool service (if any)
    /// is reachable.
    pub fn is_operational(&self) -> bool {
        self.backends.values().any(|healthy| *healthy) && self.tool_service.unwrap_or(true)
    }
}

pub struct CheckHealthUseCase {
    backends: Vec<Arc<dyn BackendAdapter>>,
    tool_service: Option<Arc<dyn ToolServicePort>>,
    timeout: Duration,
}

impl CheckHealthUseCase {
    pub fn new(backends: Vec<Arc<dyn BackendAdapter>>, timeout: Duration) -> Self {
        Self {
            backends,
            tool_service: None,
            timeout,
        }
    }

    pub fn with_tool_service(mut self, service: Arc<dyn ToolServicePort>) -> Self {
        self.tool_service = Some(service);
        self
    }

    pub async fn execute(&self) -> HealthReport {
        let backend_probes = self.backends.iter().map(|backend| async move {
            let healthy = tokio::time::timeout(self.timeout, backend.is_healthy())
                .await
                .unwrap_or(false);
            debug!(backend = %backend.id(), healthy, "Backend probe finished");
            (backend.id().clone(), healthy)
        });

        let tool_probe = async {
            match &self.tool_service {
                Some(service) => Some(
                    tokio::time::timeout(self.timeout, service.is_healthy())
                        .await
                        .unwrap_or(false),
                ),
                None => None,
            }
        };

        let (backends, tool_service) = futures::join!(join_all(backend_probes), tool_probe);

        HealthReport {
            backends: backends.into_iter().collect(),
            tool_service,
        }
    }
}
