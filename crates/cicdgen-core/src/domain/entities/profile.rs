//! The resolved description of a project.
//!
//! A `ProjectProfile` is built once per analysis through
//! [`ProjectProfileBuilder`] and never mutated afterwards. Routing and
//! rendering only ever read it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    value_objects::{Framework, PackageManager},
};

/// Runtime version used when a manifest declares no engine constraint.
pub const DEFAULT_RUNTIME_VERSION: &str = "18";
/// Port used when no script mentions one.
pub const DEFAULT_PORT: u16 = 3000;
/// Application name used when the manifest has none.
pub const DEFAULT_APP_NAME: &str = "app";
/// Application version used when the manifest has none.
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Structured description of a project, produced by a detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    #[serde(rename = "type")]
    detector: String,
    path: PathBuf,
    name: String,
    version: String,
    runtime_version: String,
    package_manager: PackageManager,
    framework: Framework,
    has_tests: bool,
    port: u16,
    build_command: Option<String>,
    start_command: Option<String>,
    scripts: BTreeMap<String, String>,
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
}

impl ProjectProfile {
    /// Start building a profile for the detector with the given identity.
    pub fn builder(detector: impl Into<String>, path: impl Into<PathBuf>) -> ProjectProfileBuilder {
        ProjectProfileBuilder::new(detector, path)
    }

    /// Identity of the detector that produced this profile.
    pub fn detector(&self) -> &str {
        &self.detector
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn framework(&self) -> &Framework {
        &self.framework
    }
    pub const fn has_tests(&self) -> bool {
        self.has_tests
    }
    pub const fn port(&self) -> u16 {
        self.port
    }
    pub fn build_command(&self) -> Option<&str> {
        self.build_command.as_deref()
    }
    pub fn start_command(&self) -> Option<&str> {
        self.start_command.as_deref()
    }
    pub fn scripts(&self) -> &BTreeMap<String, String> {
        &self.scripts
    }
    pub fn dependencies(&self) -> &BTreeMap<String, String> {
        &self.dependencies
    }
    pub fn dev_dependencies(&self) -> &BTreeMap<String, String> {
        &self.dev_dependencies
    }

    /// The short form shown by `analyze` without `--verbose`.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            detector: self.detector.clone(),
            framework: self.framework.clone(),
            package_manager: self.package_manager,
            runtime_version: self.runtime_version.clone(),
            port: self.port,
        }
    }
}

impl fmt::Display for ProjectProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, node {})",
            self.name, self.framework, self.package_manager, self.runtime_version
        )
    }
}

/// Reporting view of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(rename = "type")]
    pub detector: String,
    pub framework: Framework,
    pub package_manager: PackageManager,
    pub runtime_version: String,
    pub port: u16,
}

/// Builder for [`ProjectProfile`].
///
/// Every optional field starts at its documented default, so a detector only
/// sets what it actually found.
#[derive(Debug, Clone)]
pub struct ProjectProfileBuilder {
    profile: ProjectProfile,
}

impl ProjectProfileBuilder {
    pub fn new(detector: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            profile: ProjectProfile {
                detector: detector.into(),
                path: path.into(),
                name: DEFAULT_APP_NAME.into(),
                version: DEFAULT_APP_VERSION.into(),
                runtime_version: DEFAULT_RUNTIME_VERSION.into(),
                package_manager: PackageManager::default(),
                framework: Framework::Node,
                has_tests: false,
                port: DEFAULT_PORT,
                build_command: None,
                start_command: None,
                scripts: BTreeMap::new(),
                dependencies: BTreeMap::new(),
                dev_dependencies: BTreeMap::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.profile.version = version.into();
        self
    }

    pub fn runtime_version(mut self, version: impl Into<String>) -> Self {
        self.profile.runtime_version = version.into();
        self
    }

    pub fn package_manager(mut self, pm: PackageManager) -> Self {
        self.profile.package_manager = pm;
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.profile.framework = framework;
        self
    }

    pub fn has_tests(mut self, has_tests: bool) -> Self {
        self.profile.has_tests = has_tests;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.profile.port = port;
        self
    }

    pub fn build_command(mut self, command: Option<impl Into<String>>) -> Self {
        self.profile.build_command = command.map(Into::into);
        self
    }

    pub fn start_command(mut self, command: Option<impl Into<String>>) -> Self {
        self.profile.start_command = command.map(Into::into);
        self
    }

    pub fn scripts(mut self, scripts: BTreeMap<String, String>) -> Self {
        self.profile.scripts = scripts;
        self
    }

    pub fn dependencies(mut self, deps: BTreeMap<String, String>) -> Self {
        self.profile.dependencies = deps;
        self
    }

    pub fn dev_dependencies(mut self, deps: BTreeMap<String, String>) -> Self {
        self.profile.dev_dependencies = deps;
        self
    }

    /// Validate and produce the profile.
    ///
    /// # Errors
    ///
    /// `InvalidProfile` when the runtime version or name is blank, or the
    /// port is zero.
    pub fn build(self) -> Result<ProjectProfile, DomainError> {
        let p = self.profile;

        if p.detector.trim().is_empty() {
            return Err(DomainError::InvalidProfile {
                field: "type",
                reason: "detector identity cannot be empty".into(),
            });
        }
        if p.runtime_version.trim().is_empty() {
            return Err(DomainError::InvalidProfile {
                field: "runtimeVersion",
                reason: "runtime version cannot be empty".into(),
            });
        }
        if p.name.trim().is_empty() {
            return Err(DomainError::InvalidProfile {
                field: "name",
                reason: "name cannot be empty".into(),
            });
        }
        if p.port == 0 {
            return Err(DomainError::InvalidProfile {
                field: "port",
                reason: "port must be positive".into(),
            });
        }

        Ok(p)
    }
}
