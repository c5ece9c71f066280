//! Tool service adapters
//!
//! Implements [`ToolServicePort`](huddle_application::ToolServicePort) for the
//! external fantasy data service.

mod jsonrpc;

pub use jsonrpc::JsonRpcToolService;
