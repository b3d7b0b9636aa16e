//! Built-in templates and override discovery.
//!
//! The eight templates that ship with cicdgen are compiled into the binary
//! with `include_str!`, so a fresh install never depends on files next to
//! the executable. A user template directory can replace any of them by
//! name (see [`override_dir`]).
//!
//! # Override resolution order
//!
//! The first candidate that exists wins:
//!
//! 1. An explicit path (the `--templates` flag or `templates.local_path`).
//! 2. **`$CICDGEN_TEMPLATES_DIR`**.
//! 3. **`./.cicdgen/templates`**, relative to the current directory.
//!
//! An override directory uses the same layout as the built-ins:
//!
//! ```text
//! templates/
//! ├── container/
//! │   └── react.tmpl      ← replaces the built-in container/react
//! └── pipeline/
//!     └── backend.tmpl
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use cicdgen_core::domain::{ArtifactKind, DomainError, Template};

/// Environment variable naming an override template directory.
pub const TEMPLATES_DIR_ENV: &str = "CICDGEN_TEMPLATES_DIR";

/// Override directory probed when nothing else is configured.
pub const DEFAULT_OVERRIDE_DIR: &str = ".cicdgen/templates";

struct Builtin {
    kind: ArtifactKind,
    name: &'static str,
    description: &'static str,
    body: &'static str,
}

const BUILTINS: [Builtin; 8] = [
    Builtin {
        kind: ArtifactKind::Container,
        name: "basic",
        description: "Multi-stage Node.js image running the start script",
        body: include_str!("../templates/container/basic.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Container,
        name: "react",
        description: "React build served by nginx on port 80",
        body: include_str!("../templates/container/react.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Container,
        name: "nextjs",
        description: "Next.js build with a slim runner stage",
        body: include_str!("../templates/container/nextjs.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Container,
        name: "api",
        description: "Node.js API server with a health check",
        body: include_str!("../templates/container/api.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Pipeline,
        name: "basic",
        description: "Install, test, build, image and manual deploy",
        body: include_str!("../templates/pipeline/basic.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Pipeline,
        name: "frontend",
        description: "Frontend pipeline with lint, coverage and staging deploy",
        body: include_str!("../templates/pipeline/frontend.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Pipeline,
        name: "backend",
        description: "API pipeline with a dependency audit stage",
        body: include_str!("../templates/pipeline/backend.tmpl"),
    },
    Builtin {
        kind: ArtifactKind::Pipeline,
        name: "fullstack",
        description: "Next.js pipeline with type checking and build cache",
        body: include_str!("../templates/pipeline/fullstack.tmpl"),
    },
];

/// Parse every compiled-in template.
///
/// # Errors
///
/// `InvalidTemplate` if a built-in body uses an unknown placeholder. This is
/// a packaging defect and is covered by the tests below.
#[instrument]
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    let templates = BUILTINS
        .iter()
        .map(|b| Template::builtin(b.kind, b.name, b.description, b.body))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = templates.len(), "built-in templates parsed");
    Ok(templates)
}

/// Find the template override directory, if any.
///
/// `explicit` takes priority over the environment and the default location.
/// Returns `None` when no candidate exists, which is the normal case.
#[instrument]
pub fn override_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    for candidate in candidate_paths(explicit) {
        debug!(path = %candidate.display(), "checking override templates path");

        if candidate.is_dir() {
            info!(path = %candidate.display(), "using template overrides");
            return Some(candidate);
        }
    }

    debug!("no template override directory found");
    None
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
    }

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        if !env_dir.trim().is_empty() {
            paths.push(PathBuf::from(env_dir));
        }
    }

    paths.push(PathBuf::from(DEFAULT_OVERRIDE_DIR));
    paths
}
