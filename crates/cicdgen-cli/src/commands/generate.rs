//! `cicdgen generate`: analyze a project and write its deployment files.

use cicdgen_adapters::builtin_validators;
use cicdgen_core::application::{GenerateOptions, GenerateService, GenerationReport};
use tracing::instrument;

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let json = output.format() == OutputFormat::Json;
    let filesystem = super::local_filesystem();

    if !json {
        output.header("cicdgen")?;
        output.info(&format!("Analyzing project at {}", args.path.display()))?;
    }
    let profile = super::profile_resolver(filesystem.clone()).resolve(&args.path)?;

    if global.verbose > 0 && !json {
        output.print("Project profile:")?;
        output.json("project profile", &profile)?;
    }

    let store = super::template_store(&global, &config)?;
    let generator = GenerateService::new(Box::new(store), builtin_validators(), filesystem);
    let options = GenerateOptions {
        dry_run: args.effective_dry_run(config.generate.dry_run),
        output_dir: args.output.unwrap_or(config.generate.output_dir),
    };

    if !json {
        output.info(&format!("Generating files for {profile}"))?;
    }
    let report = generator.generate_report(&profile, &options)?;

    if json {
        return output.json("generation report", &report);
    }

    summarize(&report, &output)?;

    if args.print {
        for artifact in &report.artifacts {
            output.header(&format!("# --- {} ---", artifact.filename()))?;
            output.raw(artifact.content())?;
        }
    }

    Ok(())
}

fn summarize(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    match &report.output_dir {
        Some(dir) => output.success(&format!(
            "Generated {} files in {}",
            report.artifacts.len(),
            dir.display()
        ))?,
        None => output.success(&format!(
            "Dry run: {} files would be generated",
            report.artifacts.len()
        ))?,
    }
    for artifact in &report.artifacts {
        output.item(artifact.filename())?;
    }

    for diagnostics in &report.diagnostics {
        for warning in &diagnostics.report.warnings {
            output.warning(&format!("{}: {warning}", diagnostics.filename))?;
        }
    }

    for rejected in report.rejected() {
        output.error(&format!(
            "{} was omitted ({} failed validation): {}",
            rejected.filename,
            rejected.template,
            rejected.report.errors.join("; ")
        ))?;
    }

    for existing in &report.existing {
        output.info(&format!(
            "{} already exists in the project; compare it with the generated copy",
            existing.display()
        ))?;
    }

    Ok(())
}
