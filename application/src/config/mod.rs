//! Application configuration
//!
//! Holds the parameters use cases are constructed with. File formats and
//! layering live in the infrastructure layer.

mod router_config;

pub use router_config::RouterConfig;
