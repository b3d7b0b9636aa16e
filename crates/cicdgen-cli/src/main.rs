//! # cicdgen CLI
//!
//! Detects a project's stack and generates its Dockerfile, GitLab CI
//! pipeline and `.dockerignore`.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments (clap handles `--help` /
//!    `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, config files, environment).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! |  0   | Success                                        |
//! |  1   | Internal / system error                        |
//! |  2   | User error, unsupported project, rejected file |
//! |  3   | Project or file not found                      |
//! |  4   | Configuration error                            |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is fine; real deployments use the environment directly.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose),
    };

    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => {
            info!("cicdgen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(cmd) => commands::generate::execute(cmd, cli.global, config, output),
        Commands::Analyze(cmd) => commands::analyze::execute(cmd, cli.global, output),
        Commands::Validate(cmd) => commands::validate::execute(cmd, output),
        Commands::Templates(cmd) => commands::templates::execute(cmd, cli.global, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log `err`, print it to stderr and pick the exit code.
///
/// Colour is used only when stderr is a terminal.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }

    #[test]
    fn every_command_is_reachable() {
        let names: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        for expected in [
            "generate",
            "analyze",
            "validate",
            "templates",
            "init",
            "completions",
            "config",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }
}
