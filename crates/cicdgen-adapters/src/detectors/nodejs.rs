//! Node.js detector.
//!
//! Recognises a project by its `package.json` and derives the profile from
//! the manifest plus the lock files next to it. Every field has a fixed
//! policy; see the functions below.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use cicdgen_core::{
    application::{
        ApplicationError, IoFailureKind,
        ports::{Detector, Filesystem},
    },
    domain::{
        Framework, PackageManager, ProjectProfile,
        entities::profile::{
            DEFAULT_APP_NAME, DEFAULT_APP_VERSION, DEFAULT_PORT, DEFAULT_RUNTIME_VERSION,
        },
    },
    error::CicdResult,
};

/// Manifest whose presence marks a Node.js project.
pub const MANIFEST_FILE: &str = "package.json";

/// Oldest runtime major the generated files target.
pub const RUNTIME_VERSION_FLOOR: u32 = 14;

/// The `test` script `npm init` writes when there are no tests.
const PLACEHOLDER_TEST_SCRIPT: &str = r#"echo "Error: no test specified" && exit 1"#;

const BUILD_SCRIPTS: [&str; 3] = ["build", "compile", "build:prod"];
const START_SCRIPTS: [&str; 2] = ["start", "serve"];

static ENGINE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.?(\d+)?").expect("valid regex"));

static PORT_IN_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PORT[=\s]+(\d+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeJsDetector;

impl NodeJsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NodeJsDetector {
    fn identify(&self) -> &str {
        "nodejs"
    }

    fn detect(&self, root: &Path, fs: &dyn Filesystem) -> bool {
        fs.exists(&root.join(MANIFEST_FILE))
    }

    #[instrument(skip(self, fs), fields(root = %root.display()))]
    fn analyze(&self, root: &Path, fs: &dyn Filesystem) -> CicdResult<ProjectProfile> {
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = fs.read_json(&manifest_path)?;
        let Value::Object(manifest) = manifest else {
            return Err(ApplicationError::io(
                manifest_path,
                IoFailureKind::Parse,
                "manifest root is not a JSON object",
            )
            .into());
        };

        let scripts = string_entries(manifest.get("scripts"));
        let dependencies = string_entries(manifest.get("dependencies"));
        let dev_dependencies = string_entries(manifest.get("devDependencies"));

        let profile = ProjectProfile::builder(self.identify(), root)
            .name(string_field(&manifest, "name").unwrap_or(DEFAULT_APP_NAME))
            .version(string_field(&manifest, "version").unwrap_or(DEFAULT_APP_VERSION))
            .runtime_version(runtime_version(engine_constraint(&manifest)))
            .package_manager(package_manager(root, fs))
            .framework(framework(&dependencies, &dev_dependencies))
            .has_tests(has_tests(&scripts))
            .port(port(&scripts))
            .build_command(first_script(&scripts, &BUILD_SCRIPTS))
            .start_command(first_script(&scripts, &START_SCRIPTS))
            .scripts(scripts.into_iter().collect())
            .dependencies(dependencies.into_iter().collect())
            .dev_dependencies(dev_dependencies.into_iter().collect())
            .build()?;

        debug!(profile = %profile, "Node.js profile built");
        Ok(profile)
    }
}

// ── Manifest access ──────────────────────────────────────────────────────────

fn string_field<'a>(manifest: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    manifest
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn engine_constraint(manifest: &Map<String, Value>) -> Option<&str> {
    manifest
        .get("engines")
        .and_then(|engines| engines.get("node"))
        .and_then(Value::as_str)
}

/// String-valued entries of a manifest object, in manifest order.
///
/// Entries whose value is not a string are dropped, as is a section that is
/// not an object.
fn string_entries(section: Option<&Value>) -> Vec<(String, String)> {
    section
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn contains_key(entries: &[(String, String)], key: &str) -> bool {
    entries.iter().any(|(k, _)| k == key)
}

// ── Field policies ───────────────────────────────────────────────────────────

/// Runtime version from an `engines.node` constraint.
///
/// `>=16.0.0` gives `16`, `^16.2.0` gives `16.2`, `14.x` gives `14.0`. A
/// major below [`RUNTIME_VERSION_FLOOR`] is raised to the floor with a
/// warning. No constraint, or one without digits, gives the default.
pub fn runtime_version(constraint: Option<&str>) -> String {
    let Some(constraint) = constraint else {
        debug!(default = DEFAULT_RUNTIME_VERSION, "no engines.node constraint");
        return DEFAULT_RUNTIME_VERSION.to_string();
    };

    let Some(caps) = ENGINE_VERSION.captures(constraint) else {
        debug!(constraint, "engines.node has no version number");
        return DEFAULT_RUNTIME_VERSION.to_string();
    };

    let Some(major) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
        return DEFAULT_RUNTIME_VERSION.to_string();
    };
    let minor = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    if major < RUNTIME_VERSION_FLOOR {
        warn!(
            declared = major,
            floor = RUNTIME_VERSION_FLOOR,
            "Declared Node.js version is below the supported floor, using the floor"
        );
        return RUNTIME_VERSION_FLOOR.to_string();
    }

    if constraint.contains(">=") {
        major.to_string()
    } else {
        format!("{major}.{minor}")
    }
}

/// Package manager from the lock file present in `root`.
///
/// `yarn.lock` wins over `pnpm-lock.yaml`; with neither it is npm.
pub fn package_manager(root: &Path, fs: &dyn Filesystem) -> PackageManager {
    [PackageManager::Yarn, PackageManager::Pnpm]
        .into_iter()
        .find(|pm| fs.exists(&root.join(pm.lock_file())))
        .unwrap_or_default()
}

/// Framework from the merged dependency sets, first hit in
/// [`Framework::DETECTION_ORDER`]. Plain Node.js when nothing matches.
pub fn framework(
    dependencies: &[(String, String)],
    dev_dependencies: &[(String, String)],
) -> Framework {
    Framework::DETECTION_ORDER
        .into_iter()
        .find(|fw| {
            contains_key(dependencies, fw.as_str()) || contains_key(dev_dependencies, fw.as_str())
        })
        .unwrap_or(Framework::Node)
}

fn has_tests(scripts: &[(String, String)]) -> bool {
    scripts
        .iter()
        .find(|(name, _)| name == "test")
        .is_some_and(|(_, cmd)| !cmd.trim().is_empty() && cmd != PLACEHOLDER_TEST_SCRIPT)
}

/// First `PORT=<n>` or `PORT <n>` in the scripts, in manifest order.
///
/// A number outside `1..=65535` is skipped and the scan continues.
pub fn port(scripts: &[(String, String)]) -> u16 {
    scripts
        .iter()
        .flat_map(|(_, cmd)| PORT_IN_SCRIPT.captures_iter(cmd))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u16>().ok())
        .find(|p| *p != 0)
        .unwrap_or(DEFAULT_PORT)
}

fn first_script(scripts: &[(String, String)], candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|name| contains_key(scripts, name))
        .map(|name| name.to_string())
}
