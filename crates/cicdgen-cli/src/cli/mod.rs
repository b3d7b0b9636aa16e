//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cicdgen_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cicdgen",
    bin_name = "cicdgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Dockerfile, GitLab CI pipeline and .dockerignore for a project",
    long_about = "cicdgen inspects a project directory, works out its stack \
                  (framework, package manager, runtime version, port) and renders \
                  deployment files that fit it.",
    after_help = "EXAMPLES:\n\
        \x20 cicdgen generate --path ./my-app\n\
        \x20 cicdgen gen -p ./my-app -o ./deploy --dry-run\n\
        \x20 cicdgen analyze --path ./my-app --output-format json\n\
        \x20 cicdgen validate --path ./my-app\n\
        \x20 cicdgen completions bash > /usr/share/bash-completion/completions/cicdgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a project and generate its deployment files.
    #[command(
        visible_alias = "gen",
        about = "Generate deployment files for a project",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen generate\n\
            \x20 cicdgen gen --path ./my-app --output ./deploy\n\
            \x20 cicdgen gen --dry-run --print"
    )]
    Generate(GenerateArgs),

    /// Analyze a project without generating anything.
    #[command(
        about = "Show the detected project profile",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen analyze --path ./my-app\n\
            \x20 cicdgen analyze -v"
    )]
    Analyze(AnalyzeArgs),

    /// Validate an existing Dockerfile and .gitlab-ci.yml.
    #[command(
        about = "Validate existing deployment files",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen validate\n\
            \x20 cicdgen validate --path ./generated"
    )]
    Validate(ValidateArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen templates\n\
            \x20 cicdgen templates --kind pipeline\n\
            \x20 cicdgen ls --templates ./my-templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Initialise a cicdgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen init           # default location\n\
            \x20 cicdgen init --global  # global config\n\
            \x20 cicdgen init --local   # local config in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cicdgen completions bash > ~/.local/share/bash-completion/completions/cicdgen\n\
            \x20 cicdgen completions zsh  > ~/.zfunc/_cicdgen\n\
            \x20 cicdgen completions fish > ~/.config/fish/completions/cicdgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the cicdgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cicdgen config get generate.output_dir\n\
            \x20 cicdgen config list\n\
            \x20 cicdgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `cicdgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project directory to analyze.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,

    /// Where the files are written. Defaults to `generate.output_dir`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: ./generated)"
    )]
    pub output: Option<PathBuf>,

    /// Render and validate without writing any files.
    #[arg(
        long = "dry-run",
        overrides_with = "no_dry_run",
        help = "Show what would be generated without writing"
    )]
    pub dry_run: bool,

    /// Write files even when `generate.dry_run` is set in the config.
    #[arg(
        long = "no-dry-run",
        overrides_with = "dry_run",
        help = "Write files even if the config enables dry run"
    )]
    pub no_dry_run: bool,

    /// Print the generated file contents to stdout.
    #[arg(long = "print", help = "Print generated file contents")]
    pub print: bool,
}

impl GenerateArgs {
    /// Whether to skip writing, given the `generate.dry_run` config value.
    /// An explicit flag beats the config; the last of the two flags wins.
    pub fn effective_dry_run(&self, configured: bool) -> bool {
        if self.no_dry_run {
            false
        } else {
            self.dry_run || configured
        }
    }
}

// ── analyze ───────────────────────────────────────────────────────────────────

/// Arguments for `cicdgen analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Project directory to analyze.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `cicdgen validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Directory holding the `Dockerfile` and `.gitlab-ci.yml`.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Directory containing the files to validate"
    )]
    pub path: PathBuf,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `cicdgen templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Only show one artifact kind.
    #[arg(short = 'k', long = "kind", value_enum, help = "Filter by artifact kind")]
    pub kind: Option<KindArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Artifact kind as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Dockerfile templates.
    #[value(alias = "docker")]
    Container,
    /// GitLab CI templates.
    #[value(alias = "ci")]
    Pipeline,
}

impl From<KindArg> for ArtifactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Container => ArtifactKind::Container,
            KindArg::Pipeline => ArtifactKind::Pipeline,
        }
    }
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One ID per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cicdgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location.
    #[arg(long = "global", conflicts_with = "local", help = "Create global configuration")]
    pub global: bool,

    /// Write to `.cicdgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cicdgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cicdgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generate.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
