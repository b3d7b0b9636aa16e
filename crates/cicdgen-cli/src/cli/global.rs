//! Flags accepted before or after any `cicdgen` subcommand.
//!
//! These control how much cicdgen logs, where it reads configuration and
//! template overrides from, and how results are printed.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level: WARN by default, then INFO, DEBUG and TRACE per extra `v`.
    ///
    /// At INFO and above `generate` also prints the resolved project profile.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v info, -vv debug, -vvv trace)",
        long_help = "Raise the log level written to stderr:
    (none)  - warnings, e.g. a clamped Node.js version
    -v      - detection and generation steps, full profile
    -vv     - template selection and validator diagnostics
    -vvv    - everything, including file reads"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. JSON reports are still written.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output even on a terminal. Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Replaces the global and `.cicdgen.toml` files. Must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the usual locations"
    )]
    pub config: Option<PathBuf>,

    /// Directory of template overrides (`container/*.tmpl`, `pipeline/*.tmpl`).
    #[arg(
        long = "templates",
        global = true,
        value_name = "DIR",
        help = "Template override directory"
    )]
    pub templates: Option<PathBuf>,

    /// `auto` falls back to `output.format` from the config, then to
    /// `human` on a terminal and `plain` elsewhere.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format for reports"
    )]
    pub output_format: OutputFormat,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Headers, colours and check marks.
    Human,
    /// Same lines as `human` without styling.
    Plain,
    /// Profiles, reports and listings as JSON on stdout.
    Json,
}
