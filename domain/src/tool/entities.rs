//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Check that a name only uses characters every backend accepts
/// (`A-Z`, `a-z`, `0-9`, `_`, `-`) and is not empty.
pub fn is_backend_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Rewrite a tool name into its backend-safe form.
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`, so
/// `players.search` becomes `players_search`. The mapping is deterministic.
pub fn to_backend_safe_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Description of a tool offered to backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Backend-safe name (see [`is_backend_safe_name`]).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema of the tool's arguments (`{"type": "object", ...}`).
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// A call to a tool with arguments, as emitted by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Backend-safe tool name
    pub name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Build a call from a JSON arguments value.
    ///
    /// Backends sometimes send arguments as a JSON-encoded string and sometimes
    /// as `null`; anything that is not an object yields empty parameters.
    pub fn from_arguments(name: impl Into<String>, arguments: &Value) -> Self {
        let parameters = match arguments {
            Value::Object(map) => map.clone(),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn parameters_value(&self) -> Value {
        Value::Object(self.parameters.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_name_check() {
        assert!(is_backend_safe_name("players_search"));
        assert!(is_backend_safe_name("get-week-2"));
        assert!(!is_backend_safe_name("players.search"));
        assert!(!is_backend_safe_name("a b"));
        assert!(!is_backend_safe_name(""));
    }

    #[test]
    fn test_safe_name_rewrite() {
        assert_eq!(to_backend_safe_name("players.search"), "players_search");
        assert_eq!(to_backend_safe_name("league/roster v2"), "league_roster_v2");
        assert_eq!(to_backend_safe_name("already_ok-1"), "already_ok-1");
        assert!(is_backend_safe_name(&to_backend_safe_name("é.x")));
        assert_eq!(to_backend_safe_name(""), "_");
    }

    #[test]
    fn test_tool_call_from_string_arguments() {
        let call = ToolCall::from_arguments("a", &json!("{\"week\": 14}"));
        assert_eq!(call.parameters.get("week"), Some(&json!(14)));
    }

    #[test]
    fn test_tool_call_from_garbage_arguments() {
        assert!(ToolCall::from_arguments("a", &json!("not json")).parameters.is_empty());
        assert!(ToolCall::from_arguments("a", &Value::Null).parameters.is_empty());
        assert!(ToolCall::from_arguments("a", &json!([1, 2])).parameters.is_empty());
    }

    #[test]
    fn test_builder() {
        let call = ToolCall::new("fantasy_get_roster").with_param("team_id", 7);
        assert_eq!(call.parameters_value(), json!({"team_id": 7}));
    }
}
