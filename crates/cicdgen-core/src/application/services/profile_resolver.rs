//! Profile Resolver - turns a project directory into a `ProjectProfile`.
//!
//! Resolution is first-match-wins over the registry's order. There is no
//! scoring and no tie-break: the first detector whose `detect` succeeds
//! analyses the project.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::DetectorRegistry,
    },
    domain::ProjectProfile,
    error::CicdResult,
};

pub struct ProfileResolver {
    registry: DetectorRegistry,
    filesystem: Arc<dyn Filesystem>,
}

impl ProfileResolver {
    pub fn new(registry: DetectorRegistry, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            registry,
            filesystem,
        }
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    /// Identity of the first detector that recognises `root`, if any.
    pub fn detect(&self, root: &Path) -> Option<&str> {
        self.registry
            .list()
            .find(|d| {
                let hit = d.detect(root, self.filesystem.as_ref());
                debug!(detector = d.identify(), hit, "Detection probe");
                hit
            })
            .map(|d| d.identify())
    }

    /// Resolve the profile of the project at `root`.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if `root` does not exist
    /// - `NoDetectorMatched` if no registered detector recognises it
    /// - `AnalyzerMissing` if the matched identity is not in the registry
    /// - whatever the detector's `analyze` reports
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn resolve(&self, root: &Path) -> CicdResult<ProjectProfile> {
        if !self.filesystem.exists(root) {
            return Err(ApplicationError::ProjectNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        let name = self
            .detect(root)
            .ok_or_else(|| ApplicationError::NoDetectorMatched {
                path: root.to_path_buf(),
            })?
            .to_string();

        let detector = self
            .registry
            .get(&name)
            .ok_or_else(|| ApplicationError::AnalyzerMissing { name: name.clone() })?;

        let profile = detector.analyze(root, self.filesystem.as_ref())?;
        info!(
            detector = %name,
            framework = %profile.framework(),
            package_manager = %profile.package_manager(),
            "Project analyzed"
        );
        Ok(profile)
    }
}
