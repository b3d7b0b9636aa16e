//! `cicdgen validate`: check an existing Dockerfile and `.gitlab-ci.yml`.
//!
//! A missing file is reported and skipped; finding neither is an error. A
//! pipeline file must also declare its `stages`. Any rejected file makes the
//! command fail once every file has been checked.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use cicdgen_adapters::{YamlValidator, builtin_validators};
use cicdgen_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ArtifactKind, ValidationReport},
    error::CicdError,
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Top-level keys an existing pipeline file must define.
const REQUIRED_PIPELINE_KEYS: &[&str] = &["stages"];

/// Outcome for one file on disk.
#[derive(Debug, Serialize)]
struct FileValidation {
    file: String,
    kind: ArtifactKind,
    accepted: bool,
    #[serde(flatten)]
    report: ValidationReport,
}

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let filesystem = super::local_filesystem();
    let results = validate_dir(&args.path, filesystem.as_ref())?;

    if results.is_empty() {
        return Err(CliError::NothingToValidate { path: args.path });
    }

    if output.format() == OutputFormat::Json {
        output.json("validation results", &results)?;
    } else {
        output.header(&format!("Validating {}", args.path.display()))?;
        for result in &results {
            print_result(result, &output)?;
        }
        for kind in ArtifactKind::ALL {
            if !results.iter().any(|r| r.kind == kind) {
                output.info(&format!("{} not found, skipped", kind.filename()))?;
            }
        }
    }

    let rejected: Vec<String> = results
        .iter()
        .filter(|r| !r.accepted)
        .map(|r| r.file.clone())
        .collect();
    if rejected.is_empty() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed { files: rejected })
    }
}

fn validate_dir(dir: &Path, filesystem: &dyn Filesystem) -> CliResult<Vec<FileValidation>> {
    if !filesystem.exists(dir) {
        return Err(CicdError::from(ApplicationError::ProjectNotFound {
            path: dir.to_path_buf(),
        })
        .into());
    }

    let validators = builtin_validators();
    let mut results = Vec::new();

    for kind in ArtifactKind::ALL {
        let path = dir.join(kind.filename());
        if !filesystem.exists(&path) {
            debug!(path = %path.display(), "Not present");
            continue;
        }

        let validator = validators
            .iter()
            .find(|v| v.kind() == kind)
            .ok_or_else(|| {
                CicdError::from(ApplicationError::AdapterNotConfigured {
                    name: "artifact validator",
                })
            })?;
        let content = filesystem.read_to_string(&path)?;
        let mut report = validator.validate(&content);
        if kind == ArtifactKind::Pipeline && report.is_accepted() {
            if let Err(e) = YamlValidator::validate_structure(&content, REQUIRED_PIPELINE_KEYS) {
                report.error(e.to_string());
            }
        }

        results.push(FileValidation {
            file: kind.filename().to_string(),
            kind,
            accepted: report.is_accepted(),
            report,
        });
    }

    Ok(results)
}

fn print_result(result: &FileValidation, output: &OutputManager) -> CliResult<()> {
    if result.accepted {
        output.success(&format!("{} is valid", result.file))?;
    } else {
        output.error(&format!("{} is invalid", result.file))?;
        for error in &result.report.errors {
            output.error(&format!("  {error}"))?;
        }
    }
    for warning in &result.report.warnings {
        output.warning(&format!("{}: {warning}", result.file))?;
    }
    Ok(())
}
