//! Exchange domain: what goes to a backend and what comes back.
//!
//! - [`message::Message`]: a single conversation turn
//! - [`request::LlmRequest`]: a conversation plus tools and sampling limits
//! - [`response::LlmResponse`]: a backend's answer, possibly with tool calls

pub mod message;
pub mod request;
pub mod response;
