//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (merged at the call-site, not here)
//! 2. Environment variables: `CICDGEN_<SECTION>__<KEY>`, e.g.
//!    `CICDGEN_GENERATE__OUTPUT_DIR`
//! 3. `--config FILE` if given; otherwise `.cicdgen.toml` in the current
//!    directory layered over the platform config file
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".cicdgen.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CICDGEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generate: GenerateConfig,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Where `generate` writes when `--output` is not given.
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template override directory; `--templates` wins over it.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, config files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading explicit config file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                if let Some(global) = Self::global_config_path() {
                    builder = builder.add_source(File::from(global.as_path()).required(false));
                }
                builder =
                    builder.add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        config.try_deserialize().map_err(config_error)
    }

    /// Platform config file, e.g. `~/.config/cicdgen/config.toml`.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cicdgen", "cicdgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The config file `load(None)` gives the highest priority to.
    ///
    /// `.cicdgen.toml` when it exists, otherwise the platform path, falling
    /// back to `.cicdgen.toml` on platforms without a config dir.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        Self::global_config_path().unwrap_or(local)
    }

    /// Look up a dotted key, e.g. `generate.output_dir`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "generate.output_dir" => self.generate.output_dir.display().to_string(),
            "generate.dry_run" => self.generate.dry_run.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self
                .output
                .format
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default(),
            "templates.local_path" => self
                .templates
                .local_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
