//! Structured configuration issues.
//!
//! [`FileConfig::validate`](super::FileConfig::validate) never stops at the
//! first problem; it reports every issue it finds with a severity so the
//! binary can warn about some and refuse to start on others.

use thiserror::Error;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A timeout or TTL field is zero.
    ZeroDuration { field: String },
    /// A `[[backends]]` entry has an empty `id`.
    EmptyBackendId,
    /// Two `[[backends]]` entries share an `id`.
    DuplicateBackendId { id: String },
    /// `default_backend` or a fallback names a backend that is not declared.
    UnknownBackendReference { field: String, id: String },
    /// A string field holds a value outside its allowed set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// Tools are enabled but an endpoint is missing.
    MissingEndpoint { field: String },
    /// No backend is declared at all.
    NoBackends,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Raised when a configuration has at least one error-level issue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ConfigValidationError {
    /// Fail if any issue is an error; warnings pass.
    pub fn check(issues: &[ConfigIssue]) -> Result<(), ConfigValidationError> {
        let errors: Vec<String> = issues
            .iter()
            .filter(|issue| issue.is_error())
            .map(|issue| issue.message.clone())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_fail_check() {
        let issues = vec![ConfigIssue::warning(ConfigIssueCode::NoBackends, "no backends")];
        assert!(ConfigValidationError::check(&issues).is_ok());
    }

    #[test]
    fn errors_are_joined() {
        let issues = vec![
            ConfigIssue::error(ConfigIssueCode::EmptyBackendId, "backends[0].id is empty"),
            ConfigIssue::warning(ConfigIssueCode::NoBackends, "ignored"),
            ConfigIssue::error(
                ConfigIssueCode::DuplicateBackendId { id: "a".into() },
                "duplicate backend id 'a'",
            ),
        ];
        let error = ConfigValidationError::check(&issues).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid configuration: backends[0].id is empty; duplicate backend id 'a'"
        );
    }
}
