//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cicdgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{
    ArtifactKind, ProjectProfile, Template, TemplateId, ValidationReport,
};
use crate::error::CicdResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cicdgen_adapters::filesystem::LocalFilesystem` (production)
/// - `cicdgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Failures are reported as `ApplicationError::ExternalIo` with a kind that
/// distinguishes not-found, permission and parse problems.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> CicdResult<String>;

    /// Read and parse a JSON file.
    fn read_json(&self, path: &Path) -> CicdResult<serde_json::Value>;

    /// List the entries of a directory, sorted by path.
    fn read_dir(&self, path: &Path) -> CicdResult<Vec<PathBuf>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CicdResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> CicdResult<()>;
}

/// A pluggable unit that recognises one kind of project.
///
/// Implemented by:
/// - `cicdgen_adapters::detectors::NodeJsDetector`
///
/// Detectors are stateless. `identify` is the registry key and becomes the
/// profile's `type`.
pub trait Detector: Send + Sync {
    /// Stable unique name, lowercase.
    fn identify(&self) -> &str;

    /// Whether `root` looks like a project this detector understands.
    ///
    /// Must not write anything.
    fn detect(&self, root: &Path, fs: &dyn Filesystem) -> bool;

    /// Build the profile for the project at `root`.
    fn analyze(&self, root: &Path, fs: &dyn Filesystem) -> CicdResult<ProjectProfile>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `cicdgen_adapters::template_store::InMemoryStore` (built-ins plus overrides)
pub trait TemplateStore: Send + Sync {
    /// Get a specific template by ID.
    ///
    /// # Errors
    ///
    /// `ApplicationError::TemplateNotFound` when nothing is stored under `id`.
    fn get(&self, id: &TemplateId) -> CicdResult<Template>;

    /// List all available templates, ordered by ID.
    fn list(&self) -> CicdResult<Vec<Template>>;

    /// Insert or replace a template.
    fn insert(&self, template: Template) -> CicdResult<()>;

    /// Render the template stored under `id` with `profile`.
    fn render(&self, id: &TemplateId, profile: &ProjectProfile) -> CicdResult<String> {
        Ok(self.get(id)?.render(profile))
    }
}

/// A pass/fail checker for one artifact kind.
///
/// Implemented by:
/// - `cicdgen_adapters::validators::DockerfileValidator`
/// - `cicdgen_adapters::validators::YamlValidator`
pub trait ArtifactValidator: Send + Sync {
    /// The artifact kind this validator checks.
    fn kind(&self) -> ArtifactKind;

    /// Check rendered content.
    fn validate(&self, content: &str) -> ValidationReport;
}
