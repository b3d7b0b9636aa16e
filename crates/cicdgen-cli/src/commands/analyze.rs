//! `cicdgen analyze`: show the detected profile without generating.

use tracing::instrument;

use crate::{
    cli::{AnalyzeArgs, GlobalArgs, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: AnalyzeArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let profile = super::profile_resolver(super::local_filesystem()).resolve(&args.path)?;

    if output.format() == OutputFormat::Json {
        return output.json("project profile", &profile);
    }

    let summary = profile.summary();
    output.header("Project analysis")?;
    output.field("Project", profile.name())?;
    output.field("Type", &summary.detector)?;
    output.field("Framework", summary.framework.as_str())?;
    output.field("Package manager", summary.package_manager.as_str())?;
    output.field("Node.js version", &summary.runtime_version)?;
    output.field("Port", &summary.port.to_string())?;

    if global.verbose > 0 {
        output.print("")?;
        output.print("Full profile:")?;
        output.json("project profile", &profile)?;
    }

    Ok(())
}
