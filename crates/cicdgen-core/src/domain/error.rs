// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a registry can report a rejection and keep going)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Registration
    // ========================================================================
    #[error("invalid detector '{name}': {reason}")]
    InvalidDetector { name: String, reason: String },

    // ========================================================================
    // Templates
    // ========================================================================
    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    // ========================================================================
    // Profiles
    // ========================================================================
    #[error("invalid project profile, field '{field}': {reason}")]
    InvalidProfile { field: &'static str, reason: String },

    #[error("unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDetector { name, .. } => vec![
                format!("Detector '{name}' was not registered"),
                "Detector names must be lowercase letters, digits, '-' or '_'".into(),
            ],
            Self::InvalidTemplate { template, .. } => vec![
                format!("Fix the placeholders in template '{template}'"),
                "Known placeholders: {{nodeVersion}}, {{packageManager}}, {{port}}, \
                 {{buildCommand}}, {{startCommand}}, {{appName}}, {{buildStep}}"
                    .into(),
            ],
            Self::InvalidProfile { field, .. } => vec![
                format!("Check the '{field}' value derived from the project manifest"),
            ],
            Self::UnknownValue { kind, .. } => vec![format!("Use a supported {kind}")],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProfile { .. } | Self::UnknownValue { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate { .. } => ErrorCategory::Validation,
            Self::InvalidDetector { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
