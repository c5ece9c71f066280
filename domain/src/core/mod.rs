//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::BackendId`]: identifier of an interchangeable LLM backend
//! - [`error::DomainError`]: domain-level errors

pub mod backend;
pub mod error;
