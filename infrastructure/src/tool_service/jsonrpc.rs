//! JSON-RPC 2.0 client for the external tool service.
//!
//! Methods are invoked with HTTP POST:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": 7, "method": "players.search", "params": {"query": "Nacua"}}
//! ```
//!
//! and answer with either `{"result": ...}` or `{"error": {"message": ...}}`
//! (`code` inside the error object is optional).
//! The discovery document is a plain HTTP GET.

use async_trait::async_trait;
use huddle_application::{DiscoveryError, ToolServicePort};
use huddle_domain::ToolError;
use huddle_domain::util::truncate_str;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

pub struct JsonRpcToolService {
    rpc_url: String,
    discovery_url: Option<String>,
    client: reqwest::Client,
    request_id: AtomicU64,
}

impl JsonRpcToolService {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            discovery_url: None,
            client: reqwest::Client::new(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn with_discovery_url(mut self, url: Option<String>) -> Self {
        self.discovery_url = url.filter(|u| !u.is_empty());
        self
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }
}

/// Turn a decoded JSON-RPC body into the call outcome.
///
/// A present `error` wins over `result`; a `null` result is a valid result.
fn decode_response(mut body: Value) -> Result<Value, ToolError> {
    let Some(object) = body.as_object_mut() else {
        return Err(ToolError::malformed_response("response is not a JSON object"));
    };

    if let Some(error) = object.remove("error").filter(|e| !e.is_null()) {
        let error: JsonRpcError = serde_json::from_value(error)
            .map_err(|e| ToolError::malformed_response(format!("invalid error object: {}", e)))?;
        return Err(match error.code {
            Some(code) => ToolError::rpc(code, error.message),
            None => ToolError::rpc_message(error.message),
        });
    }

    object
        .remove("result")
        .ok_or_else(|| ToolError::malformed_response("response has neither result nor error"))
}

#[async_trait]
impl ToolServicePort for JsonRpcToolService {
    async fn fetch_discovery_document(&self) -> Result<Value, DiscoveryError> {
        let url = self
            .discovery_url
            .as_deref()
            .ok_or(DiscoveryError::NotConfigured)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscoveryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::HttpStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DiscoveryError::InvalidJson(e.to_string()))
    }

    async fn invoke(&self, method: &str, params: &Map<String, Value>) -> Result<Value, ToolError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id(),
            method,
            params,
        };
        debug!(tool = %method, id = request.id, "JSON-RPC call");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ToolError::transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ToolError::transport(e.to_string()))?;

        if !status.is_success() {
            // JSON-RPC servers may attach an error object to a non-2xx reply
            if let Ok(body) = serde_json::from_str::<Value>(&text)
                && body.get("error").is_some()
            {
                return decode_response(body);
            }
            return Err(ToolError::transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate_str(text.trim(), 200)
            )));
        }

        let body = serde_json::from_str::<Value>(&text)
            .map_err(|e| ToolError::malformed_response(e.to_string()))?;
        decode_response(body)
    }
}
