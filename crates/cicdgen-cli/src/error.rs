//! Error handling for the cicdgen CLI.
//!
//! Every failure that reaches `main` is a [`CliError`]. It knows how to
//! describe itself (with suggestions), how loudly to log itself, and which
//! exit code the process should end with.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use cicdgen_core::error::{CicdError, ErrorCategory as CoreCategory};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `cicdgen-core` or one of its adapters.
    #[error("{0}")]
    Core(#[from] CicdError),

    /// `validate` found neither a Dockerfile nor a pipeline file.
    #[error("Nothing to validate in {}", path.display())]
    NothingToValidate { path: PathBuf },

    /// One or more existing files were rejected by their validator.
    #[error("{} failed validation", files.join(", "))]
    ValidationFailed { files: Vec<String> },

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Structured output could not be produced.
    #[error("Failed to serialise {what}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active config file with: cicdgen config path".into(),
                "Recreate the defaults with: cicdgen init --force".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::NothingToValidate { path } => vec![
                format!("Expected a Dockerfile or .gitlab-ci.yml in {}", path.display()),
                "Point --path at the directory holding the files".into(),
                "Generate them first with: cicdgen generate".into(),
            ],

            Self::ValidationFailed { .. } => vec![
                "Fix the errors listed above and run validate again".into(),
                "Compare with a fresh copy from: cicdgen generate --dry-run --print".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Serialize { .. } => vec!["This appears to be a bug in cicdgen".into()],
        }
    }

    /// Error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ValidationFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::NothingToValidate { .. } => ErrorCategory::NotFound,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Unsupported => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Serialize { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render the error with colours and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            for cause in self.causes() {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), cause.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error at a level matching its category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        for cause in self.causes() {
            tracing::debug!("Caused by: {}", cause);
        }
    }

    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input, an unsupported project, or a rejected file.
    UserError,
    NotFound,
    Configuration,
    /// Internal or system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign errors into [`CliError`] at call-sites, attaching a
/// context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
