//! Infrastructure layer for huddle
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod cache;
pub mod config;
pub mod logging;
pub mod providers;
pub mod tool_service;

// Re-export commonly used types
pub use cache::MemoryCacheStore;
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, ConfigValidationError, FileBackendConfig,
    FileCacheConfig, FileConfig, FileLoggingConfig, FileRouterConfig, FileToolsConfig, Severity,
};
pub use logging::JsonlExchangeLogger;
pub use providers::{ProviderKind, anthropic::AnthropicBackend, build_backends, openai::OpenAiBackend};
pub use tool_service::JsonRpcToolService;
