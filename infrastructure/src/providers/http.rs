//! Shared HTTP plumbing for backend adapters.

use huddle_application::BackendError;
use huddle_domain::util::truncate_str;
use serde_json::Value;

/// Longest error body kept in a [`BackendError::HttpStatus`].
const MAX_ERROR_BODY: usize = 500;

pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("huddle/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub(crate) fn transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout(0)
    } else {
        BackendError::ConnectionError(error.to_string())
    }
}

/// Read a response body as JSON, mapping non-2xx statuses to errors.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, BackendError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(BackendError::HttpStatus {
            status: status.as_u16(),
            body: truncate_str(body.trim(), MAX_ERROR_BODY).to_string(),
        });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://localhost:11434/v1", "chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
