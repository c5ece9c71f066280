//! Domain layer for huddle
//!
//! This crate contains the core entities and value objects. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Exchange
//!
//! An [`LlmRequest`] is an ordered conversation of [`Message`]s plus optional
//! [`ToolDescriptor`]s. A backend answers with an [`LlmResponse`] that may carry
//! [`ToolCall`]s, which are executed once and folded back into a follow-up.
//!
//! ## Advice
//!
//! Backend text is untrusted. The [`advice`] module turns it into one of four
//! fully-populated result types (lineup, start/sit, trade, waiver), clamping
//! every numeric field and substituting defaults for anything missing.

pub mod advice;
pub mod core;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use advice::{
    Advice, AdviceKind, Factor, LineupAdvice, LineupSlot, PlayerComparison, Projection,
    RiskLevel, SanitizeOutcome, Sanitized, StartSitAdvice, StartSitVerdict, TradeAdvice,
    TradeVerdict, WaiverAdvice, WaiverTarget, extract_json_object, sanitize,
};
pub use core::{backend::BackendId, error::DomainError};
pub use session::{
    message::{Message, Role},
    request::LlmRequest,
    response::{FinishReason, LlmResponse, Usage},
};
pub use tool::{
    catalog::{CatalogError, ToolCatalog},
    entities::{ToolCall, ToolDescriptor, is_backend_safe_name, to_backend_safe_name},
    value_objects::{ToolError, ToolResult},
};
