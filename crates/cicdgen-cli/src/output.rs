//! Output management and formatting.
//!
//! Everything the commands show the user goes through [`OutputManager`];
//! diagnostics go through `tracing` to stderr instead.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format auto` defers to `output.format` from the config; if
    /// that is also `auto`, a TTY gets `human` and anything else `plain`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => config.output.format,
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Write `text` exactly as given. Never suppressed: used for content the
    /// user explicitly asked for.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    /// Pretty-printed JSON. Never suppressed, never coloured.
    pub fn json<T: Serialize>(&self, what: &'static str, value: &T) -> CliResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| CliError::Serialize { what, source })?;
        Ok(self.term.write_line(&json)?)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(
            "\u{2713}",
            msg,
            |s| s.green().bold().to_string(),
            |s| s.green().to_string(),
        )
    }

    /// Error indicator: `✗ <msg>`. Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(
            "\u{26a0}",
            msg,
            |s| s.yellow().bold().to_string(),
            |s| s.yellow().to_string(),
        )
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(
            "\u{2139}",
            msg,
            |s| s.blue().bold().to_string(),
            |s| s.blue().to_string(),
        )
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `  label: value` with the value highlighted.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {label}: {value}")
        } else {
            format!("  {} {}", format!("{label}:").dimmed(), value.cyan())
        };
        self.term.write_line(&line)
    }

    /// Indented, dimmed list entry: `  - <item>`.
    pub fn item(&self, item: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = format!("  - {item}");
        if self.no_color {
            self.term.write_line(&line)
        } else {
            self.term.write_line(&line.dimmed().to_string())
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn marked(
        &self,
        mark: &str,
        msg: &str,
        paint_mark: impl Fn(&str) -> String,
        paint_msg: impl Fn(&str) -> String,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            format!("{} {}", paint_mark(mark), paint_msg(msg))
        };
        self.term.write_line(&line)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
