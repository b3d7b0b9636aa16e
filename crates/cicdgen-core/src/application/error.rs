//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside world,
//! not business rules. Business rule errors are `DomainError` from
//! `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateId;
use crate::error::ErrorCategory;

/// Kind of failure reported by a filesystem adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoFailureKind {
    NotFound,
    PermissionDenied,
    /// The file was read but its content could not be parsed.
    Parse,
    Other,
}

impl fmt::Display for IoFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::Parse => "parse error",
            Self::Other => "i/o error",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project root does not exist.
    #[error("Project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// No registered detector recognised the project.
    #[error("Could not determine the project type of {path}")]
    NoDetectorMatched { path: PathBuf },

    /// A detector matched but is no longer registered.
    #[error("No analyzer registered for project type '{name}'")]
    AnalyzerMissing { name: String },

    /// The selected template is not in the store.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: TemplateId },

    /// A rendered artifact failed validation.
    #[error("{filename} failed validation: {}", .errors.join("; "))]
    ValidationRejected {
        filename: String,
        errors: Vec<String>,
    },

    /// A filesystem collaborator failed.
    #[error("{kind} at {path}: {reason}")]
    ExternalIo {
        path: PathBuf,
        kind: IoFailureKind,
        reason: String,
    },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectNotFound { path } => vec![
                format!("Nothing exists at: {}", path.display()),
                "Pass the project directory with --path".into(),
            ],
            Self::NoDetectorMatched { path } => vec![
                format!("No supported manifest found in {}", path.display()),
                "Supported project types: Node.js (package.json)".into(),
            ],
            Self::AnalyzerMissing { name } => vec![
                format!("Detector '{name}' was unregistered during the run"),
                "This is likely a bug".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("Template '{id}' is missing from the template store"),
                "Try: cicdgen templates".into(),
                "Check the templates directory for a missing override".into(),
            ],
            Self::ValidationRejected { filename, .. } => vec![
                format!("Review the generated {filename}"),
                "Run with -v to see all validation diagnostics".into(),
            ],
            Self::ExternalIo { path, kind, .. } => match kind {
                IoFailureKind::NotFound => vec![format!("Missing: {}", path.display())],
                IoFailureKind::PermissionDenied => vec![
                    format!("Permission denied: {}", path.display()),
                    "Check the file and directory permissions".into(),
                ],
                IoFailureKind::Parse => vec![
                    format!("Could not parse {}", path.display()),
                    "Make sure the file is valid JSON".into(),
                ],
                IoFailureKind::Other => vec![
                    format!("Failed to access: {}", path.display()),
                    "Ensure the parent directory exists".into(),
                ],
            },
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {name}"),
                "This is likely a configuration error".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectNotFound { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::NoDetectorMatched { .. } => ErrorCategory::Unsupported,
            Self::ValidationRejected { .. } => ErrorCategory::Validation,
            Self::ExternalIo { kind, .. } => match kind {
                IoFailureKind::NotFound => ErrorCategory::NotFound,
                IoFailureKind::Parse => ErrorCategory::Validation,
                IoFailureKind::PermissionDenied | IoFailureKind::Other => ErrorCategory::Io,
            },
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::AnalyzerMissing { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Convenience constructor used by filesystem adapters.
    pub fn io(path: impl Into<PathBuf>, kind: IoFailureKind, reason: impl Into<String>) -> Self {
        Self::ExternalIo {
            path: path.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Whether this is a "does not exist" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ExternalIo {
                kind: IoFailureKind::NotFound,
                ..
            }
        )
    }
}
