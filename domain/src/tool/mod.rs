//! Tool domain module
//!
//! Tools are externally-implemented functions a backend may ask for while it
//! answers. This module defines how they are described, called, and how
//! their outcomes are reported.
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDescriptor │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)      │    │ (from model) │    │ (per call)   │
//! └───────┬────────┘    └──────────────┘    └──────────────┘
//!         │
//!         └─ safe name "players_search" ⇄ original "players.search"
//! ```
//!
//! # Backend-safe names
//!
//! Backends only accept tool names matching `^[A-Za-z0-9_-]+$`. External tool
//! services are free to use dotted JSON-RPC method names, so the
//! [`ToolCatalog`] rewrites every illegal character to `_` and keeps a reverse
//! lookup used when the call is dispatched.
//!
//! # Key Types
//!
//! - [`ToolDescriptor`]: name + description + JSON input schema
//! - [`ToolCall`]: a backend's request to run a tool
//! - [`ToolResult`]: the outcome of one call (content or error)
//! - [`ToolCatalog`]: the discovered descriptor set plus name translation

pub mod catalog;
pub mod entities;
pub mod value_objects;

pub use catalog::{CatalogError, ToolCatalog};
pub use entities::{ToolCall, ToolDescriptor};
pub use value_objects::{ToolError, ToolResult};
