//! `cicdgen init`: write the default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args)?;

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}

fn target_path(args: &InitArgs) -> CliResult<PathBuf> {
    if args.local {
        return Ok(PathBuf::from(LOCAL_CONFIG_FILE));
    }
    if args.global {
        return AppConfig::global_config_path().ok_or_else(|| CliError::ConfigError {
            message: "no platform configuration directory available".into(),
            source: None,
        });
    }
    Ok(AppConfig::config_path())
}
