//! `cicdgen config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).with_cli_context(|| "Failed to serialise config")?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}
