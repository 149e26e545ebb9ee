//! Error types for txweb-core
//!
//! Core errors carry an error code and severity so the API layer can
//! report them uniformly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Two columns share the same key
    DuplicateColumn,
    /// Table specification is otherwise invalid
    InvalidSpec,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::DuplicateColumn => write!(f, "DUPLICATE_COLUMN"),
            ErrorCode::InvalidSpec => write!(f, "INVALID_SPEC"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for txweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate column key: {key}")]
    DuplicateColumn { key: String },

    #[error("Invalid table specification: {message}")]
    InvalidSpec { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::DuplicateColumn { .. } => ErrorCode::DuplicateColumn,
            CoreError::InvalidSpec { .. } => ErrorCode::InvalidSpec,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::DuplicateColumn { .. } => ErrorSeverity::Critical,
            CoreError::InvalidSpec { .. } => ErrorSeverity::Critical,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::DuplicateColumn { key } => {
                details = details.with_suggestion(format!(
                    "Each column needs a unique key; '{}' appears more than once.",
                    key
                ));
            }
            CoreError::InvalidSpec { message } => {
                details = details.with_suggestion(message.clone());
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::DuplicateColumn.to_string(), "DUPLICATE_COLUMN");
        assert_eq!(ErrorCode::InvalidSpec.to_string(), "INVALID_SPEC");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::DuplicateColumn {
            key: "txid".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::DuplicateColumn);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_error_details_duplicate_column() {
        let error = CoreError::DuplicateColumn {
            key: "epoch".to_string(),
        };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::DuplicateColumn);
        assert!(details.message.contains("epoch"));
        assert!(!details.suggestions.is_empty());
    }
}
