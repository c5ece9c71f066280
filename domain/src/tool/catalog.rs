//! Tool catalog: the set of tools offered to backends.
//!
//! The catalog is built from a discovery document published by the external
//! tool service:
//!
//! ```json
//! {
//!   "methods": [
//!     {
//!       "name": "players.search",
//!       "summary": "Search players by name",
//!       "params": [
//!         { "name": "query", "schema": { "type": "string" }, "required": true },
//!         { "name": "position", "schema": { "type": "string", "enum": ["QB", "RB"] } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Each method becomes a [`ToolDescriptor`] whose name is rewritten to its
//! backend-safe form. The catalog keeps both directions of that mapping so a
//! backend's call to `players_search` is dispatched as `players.search`.
//!
//! When the document cannot be used, [`ToolCatalog::fallback`] provides a
//! fixed minimal catalog so the system stays usable.

use super::entities::{ToolDescriptor, to_backend_safe_name};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use thiserror::Error;

/// Why a discovery document could not be turned into a catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed discovery document: {0}")]
    Malformed(String),

    #[error("Discovery document declares no usable methods")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    methods: Vec<DiscoveredMethod>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredMethod {
    #[serde(default)]
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    params: Vec<DiscoveredParam>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredParam {
    #[serde(default)]
    name: String,
    #[serde(default)]
    schema: DiscoveredSchema,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscoveredSchema {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "enum", default)]
    allowed: Option<Vec<Value>>,
}

impl DiscoveredMethod {
    fn description(&self) -> String {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.description.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in self.params.iter().filter(|p| !p.name.is_empty()) {
            let mut prop = Map::new();
            prop.insert(
                "type".to_string(),
                json!(param.schema.kind.as_deref().unwrap_or("string")),
            );
            if let Some(allowed) = &param.schema.allowed {
                prop.insert("enum".to_string(), Value::Array(allowed.clone()));
            }
            if let Some(description) = &param.description {
                prop.insert("description".to_string(), json!(description));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Discovered tool descriptors plus the safe-name ⇄ original-name mapping.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    descriptors: Vec<ToolDescriptor>,
    /// Backend-safe name → original tool service identifier
    original_names: HashMap<String, String>,
    /// Original tool service identifier → backend-safe name
    safe_names: HashMap<String, String>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its original identifier (builder pattern).
    ///
    /// The descriptor is stored under the backend-safe form of `original`.
    /// If another tool already claimed the same safe name, the first one wins.
    pub fn register(
        mut self,
        original: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        let original = original.into();
        let safe = to_backend_safe_name(&original);
        if self.original_names.contains_key(&safe) {
            return self;
        }
        self.descriptors
            .push(ToolDescriptor::new(safe.clone(), description, input_schema));
        self.original_names.insert(safe.clone(), original.clone());
        self.safe_names.insert(original, safe);
        self
    }

    /// Build a catalog from a discovery document.
    pub fn from_discovery_document(document: &Value) -> Result<Self, CatalogError> {
        let document: DiscoveryDocument = serde_json::from_value(document.clone())
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let catalog = document
            .methods
            .iter()
            .filter(|m| !m.name.trim().is_empty())
            .fold(Self::new(), |catalog, method| {
                catalog.register(
                    method.name.clone(),
                    method.description(),
                    method.input_schema(),
                )
            });

        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Minimal hand-authored catalog used when discovery is unavailable.
    pub fn fallback() -> Self {
        Self::new()
            .register(
                "league.get_current_week",
                "Get the current NFL week and season type",
                json!({"type": "object", "properties": {}, "required": []}),
            )
            .register(
                "players.search",
                "Search players by name, optionally filtered by position",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {"type": "string"},
                        "position": {"type": "string", "enum": ["QB", "RB", "WR", "TE", "K", "DEF"]}
                    },
                    "required": ["query"]
                }),
            )
            .register(
                "players.get_projections",
                "Get weekly fantasy point projections for a player",
                json!({
                    "type": "object",
                    "properties": {
                        "player_id": {"type": "string"},
                        "week": {"type": "integer"}
                    },
                    "required": ["player_id"]
                }),
            )
            .register(
                "team.get_roster",
                "Get the roster of a fantasy team",
                json!({
                    "type": "object",
                    "properties": {"team_id": {"type": "string"}},
                    "required": ["team_id"]
                }),
            )
    }

    /// Original identifier for a backend-safe name.
    ///
    /// Unmapped names are returned unchanged.
    pub fn resolve_original_name<'a>(&'a self, safe_name: &'a str) -> &'a str {
        self.original_names
            .get(safe_name)
            .map(|s| s.as_str())
            .unwrap_or(safe_name)
    }

    /// Backend-safe name registered for an original identifier.
    pub fn safe_name_for(&self, original: &str) -> Option<&str> {
        self.safe_names.get(original).map(|s| s.as_str())
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, safe_name: &str) -> Option<&ToolDescriptor> {
        self.descriptors.iter().find(|d| d.name == safe_name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::is_backend_safe_name;

    fn document() -> Value {
        json!({
            "methods": [
                {
                    "name": "players.search",
                    "summary": "Search players",
                    "params": [
                        {"name": "query", "schema": {"type": "string"}, "required": true},
                        {"name": "position", "schema": {"type": "string", "enum": ["QB", "RB"]}}
                    ]
                },
                {
                    "name": "league.get_current_week",
                    "description": "Current week"
                }
            ]
        })
    }

    #[test]
    fn discovery_rewrites_dotted_names() {
        let catalog = ToolCatalog::from_discovery_document(&document()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.descriptors().iter().all(|d| is_backend_safe_name(&d.name)));
        assert_eq!(catalog.resolve_original_name("players_search"), "players.search");
        assert_eq!(
            catalog.safe_name_for("league.get_current_week"),
            Some("league_get_current_week")
        );
    }

    #[test]
    fn discovery_builds_json_schema() {
        let catalog = ToolCatalog::from_discovery_document(&document()).unwrap();
        let search = catalog.get("players_search").unwrap();

        assert_eq!(search.description, "Search players");
        assert_eq!(search.input_schema["type"], "object");
        assert_eq!(search.input_schema["properties"]["query"]["type"], "string");
        assert_eq!(
            search.input_schema["properties"]["position"]["enum"],
            json!(["QB", "RB"])
        );
        assert_eq!(search.input_schema["required"], json!(["query"]));

        let week = catalog.get("league_get_current_week").unwrap();
        assert_eq!(week.description, "Current week");
    }

    #[test]
    fn unmapped_name_resolves_to_itself() {
        let catalog = ToolCatalog::fallback();
        assert_eq!(catalog.resolve_original_name("no_such_tool"), "no_such_tool");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(
            ToolCatalog::from_discovery_document(&json!({"methods": "nope"})),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            ToolCatalog::from_discovery_document(&json!([1, 2, 3])),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn document_without_methods_is_empty() {
        assert_eq!(
            ToolCatalog::from_discovery_document(&json!({"methods": [{"name": ""}]})).unwrap_err(),
            CatalogError::Empty
        );
    }

    #[test]
    fn colliding_safe_names_keep_first() {
        let catalog = ToolCatalog::new()
            .register("a.b", "first", json!({}))
            .register("a/b", "second", json!({}));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve_original_name("a_b"), "a.b");
    }

    #[test]
    fn fallback_catalog_is_usable() {
        let catalog = ToolCatalog::fallback();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.resolve_original_name("team_get_roster"), "team.get_roster");
    }
}
