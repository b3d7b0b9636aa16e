//! Unified error handling for cicdgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cicdgen core operations.
#[derive(Debug, Error, Clone)]
pub enum CicdError {
    /// Errors from the domain layer (business rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CicdError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in cicdgen".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the error only affects one artifact rather than the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::ValidationRejected { .. })
                | Self::Domain(DomainError::InvalidDetector { .. })
        )
    }

    /// Whether this wraps a "does not exist" I/O failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_not_found())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// The project exists but no detector supports it.
    Unsupported,
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CicdResult<T> = Result<T, CicdError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> CicdResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> CicdResult<T> {
        self.map_err(|e| CicdError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
