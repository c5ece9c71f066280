//! Backend identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a configured LLM backend (e.g. `"openai"`, `"anthropic"`).
///
/// Identifiers are free-form strings chosen in configuration; the router
/// keys its adapter map on them and the cache folds them into request keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BackendId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_conversion() {
        let id = BackendId::from("openai");
        assert_eq!(id.to_string(), "openai");
        assert_eq!(id, BackendId::new("openai".to_string()));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&BackendId::from("anthropic")).unwrap();
        assert_eq!(json, "\"anthropic\"");
    }
}
