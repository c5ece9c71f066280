//! Application layer for huddle
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RouterConfig;
pub use ports::{
    backend::{BackendAdapter, BackendError},
    cache_store::{CacheError, CacheStore},
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
    tool_service::{DiscoveryError, ToolServicePort},
};
pub use use_cases::check_health::{CheckHealthUseCase, HealthReport};
pub use use_cases::execute_tools::ToolInvocationExecutor;
pub use use_cases::response_cache::{ResponseCache, cache_key};
pub use use_cases::route_request::{RequestRouter, RouterError};
pub use use_cases::run_advice::{AdviceInput, AdviceOutput, RunAdviceUseCase};
pub use use_cases::tool_catalog::{CatalogSource, SharedCatalog, discover_catalog};
