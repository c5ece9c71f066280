//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Conversation has no messages")]
    EmptyConversation,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown advice kind: {0}")]
    UnknownAdviceKind(String),
}

impl DomainError {
    /// Check if this error was caused by the caller's request shape
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyConversation | DomainError::InvalidRequest(_)
        )
    }
}
