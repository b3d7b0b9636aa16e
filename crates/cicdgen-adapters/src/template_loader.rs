//! Filesystem-based template loader.
//!
//! Reads user templates from a directory laid out by artifact kind:
//!
//! ```text
//! templates/
//! ├── container/
//! │   ├── basic.tmpl
//! │   └── react.tmpl
//! └── pipeline/
//!     └── frontend.tmpl
//! ```
//!
//! The file stem is the template name and the parent directory is its kind
//! (`container` or `pipeline`). Other files and directories are ignored.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use cicdgen_core::domain::{ArtifactKind, DomainError, Template, TemplateId, TemplateSource};

/// Extension a template file must carry.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Loads [`Template`] objects from a kind-per-directory tree.
///
/// A file that cannot be read or whose body is not a valid template emits a
/// `WARN` log and is skipped. One bad file never blocks the others.
///
/// # Example
///
/// ```no_run
/// use cicdgen_adapters::template_loader::FilesystemTemplateLoader;
///
/// let templates = FilesystemTemplateLoader::new(".cicdgen/templates").load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), cicdgen_core::domain::DomainError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template found under the templates directory.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` if the directory does not exist or cannot be walked.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(self.error(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.templates_dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| self.error(format!("directory walk error: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some((kind, name)) = classify(path) else {
                debug!(path = %path.display(), "not a template file, ignoring");
                continue;
            };

            match load_file(path, kind, name) {
                Ok(template) => {
                    debug!(id = %template.id(), "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping template file due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    fn error(&self, reason: String) -> DomainError {
        DomainError::InvalidTemplate {
            template: self.templates_dir.display().to_string(),
            reason,
        }
    }
}

/// Kind and name for `<dir>/<kind>/<name>.tmpl`, or `None` for any other path.
fn classify(path: &Path) -> Option<(ArtifactKind, String)> {
    if path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION)) {
        return None;
    }

    let kind = path
        .parent()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
        .and_then(|dir| match dir {
            "container" => Some(ArtifactKind::Container),
            "pipeline" => Some(ArtifactKind::Pipeline),
            _ => None,
        })?;

    let name = path.file_stem()?.to_str()?.to_string();
    Some((kind, name))
}

fn load_file(path: &Path, kind: ArtifactKind, name: String) -> Result<Template, DomainError> {
    let id = TemplateId::new(kind, name);
    let body = fs::read_to_string(path).map_err(|e| DomainError::InvalidTemplate {
        template: id.to_string(),
        reason: format!("failed to read '{}': {e}", path.display()),
    })?;

    Ok(Template::new(id, TemplateSource::Owned(body))?
        .with_description(format!("Override from {}", path.display())))
}
