//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut out = io::stdout();

    match args.shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &bin, &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &bin, &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &bin, &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &bin, &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, &bin, &mut out),
    }

    Ok(())
}
