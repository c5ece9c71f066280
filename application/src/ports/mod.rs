//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod backend;
pub mod cache_store;
pub mod exchange_logger;
pub mod tool_service;
