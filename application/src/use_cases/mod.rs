//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_health;
pub mod execute_tools;
pub mod response_cache;
pub mod route_request;
pub mod run_advice;
pub mod tool_catalog;
