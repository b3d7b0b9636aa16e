//! Log setup for the `cicdgen` binary.
//!
//! Detection warnings (a clamped engine version, a skipped detector or
//! template file) are logged by the library crates, which never install a
//! subscriber themselves. Everything goes to stderr so stdout stays clean for
//! `--print` and JSON output.
//!
//! `-q` → ERROR, no flag → WARN, `-v` → INFO, `-vv` → DEBUG, `-vvv` → TRACE.
//! A set `RUST_LOG` replaces this mapping entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the stderr subscriber for the binary and both library crates.
///
/// Fails if another subscriber is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    // RUST_LOG wins over the flags.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cicdgen={level},cicdgen_core={level},cicdgen_adapters={level}"
        ))
    });

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Level directive applied to each cicdgen crate.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
