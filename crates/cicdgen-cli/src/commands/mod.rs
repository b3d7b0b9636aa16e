//! Command handlers.
//!
//! Each submodule exposes an `execute` function taking the parsed arguments
//! plus whatever shared state it needs. Adapter wiring common to several
//! commands lives here.

use std::sync::Arc;

use tracing::{debug, info};

use cicdgen_adapters::{InMemoryStore, LocalFilesystem, builtin_detectors, builtin_templates};
use cicdgen_core::application::{DetectorRegistry, ProfileResolver, ports::Filesystem};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod analyze;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod templates;
pub mod validate;

/// The real filesystem, shared between services.
pub(crate) fn local_filesystem() -> Arc<dyn Filesystem> {
    Arc::new(LocalFilesystem::new())
}

/// A resolver with every built-in detector registered.
pub(crate) fn profile_resolver(filesystem: Arc<dyn Filesystem>) -> ProfileResolver {
    let mut registry = DetectorRegistry::new();
    let loaded = registry.load(builtin_detectors());
    debug!(loaded, detectors = ?registry.names(), "Detector registry ready");
    ProfileResolver::new(registry, filesystem)
}

/// Built-in templates plus any overrides.
///
/// `--templates` beats `templates.local_path`, which beats the
/// `CICDGEN_TEMPLATES_DIR` / `./.cicdgen/templates` fallbacks. A directory
/// named on the command line must exist.
pub(crate) fn template_store(global: &GlobalArgs, config: &AppConfig) -> CliResult<InMemoryStore> {
    if let Some(dir) = global.templates.as_deref().filter(|dir| !dir.is_dir()) {
        return Err(CliError::InvalidInput {
            message: format!("template directory '{}' does not exist", dir.display()),
            source: None,
        });
    }

    let store = InMemoryStore::with_builtin()?;
    let explicit = global
        .templates
        .as_deref()
        .or(config.templates.local_path.as_deref());

    if let Some(dir) = builtin_templates::override_dir(explicit) {
        let count = store.load_overrides(&dir)?;
        info!(dir = %dir.display(), count, "Using template overrides");
    }

    Ok(store)
}
