//! Generate Service - main application orchestrator.
//!
//! For each template-backed artifact kind, in order:
//! 1. Select a template from the profile's framework
//! 2. Render it
//! 3. Validate the result; a rejected artifact is dropped, the run goes on
//! 4. Write it to the output directory
//!
//! The `.dockerignore` is computed last and is never validated.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactValidator, Filesystem, TemplateStore},
    },
    domain::{
        Artifact, ArtifactKind, ProjectProfile, TemplateId, ValidationReport, ignore_file,
        routing,
    },
    error::CicdResult,
};

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory the artifacts are written to.
    pub output_dir: PathBuf,
    /// Render and validate only; write nothing.
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            dry_run: false,
        }
    }
}

/// Validation outcome for one template-backed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDiagnostics {
    pub kind: ArtifactKind,
    pub template: String,
    pub filename: String,
    pub report: ValidationReport,
}

impl ArtifactDiagnostics {
    pub fn is_accepted(&self) -> bool {
        self.report.is_accepted()
    }

    /// The rejection as an error, if the artifact was rejected.
    pub fn rejection(&self) -> Option<ApplicationError> {
        (!self.report.is_accepted()).then(|| ApplicationError::ValidationRejected {
            filename: self.filename.clone(),
            errors: self.report.errors.clone(),
        })
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Accepted artifacts: container, pipeline, ignore file.
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Vec<ArtifactDiagnostics>,
    /// Files the project already has that we generated a version of.
    pub existing: Vec<PathBuf>,
    /// Where the artifacts were written; `None` on a dry run.
    pub output_dir: Option<PathBuf>,
}

impl GenerationReport {
    pub fn rejected(&self) -> impl Iterator<Item = &ArtifactDiagnostics> {
        self.diagnostics.iter().filter(|d| !d.is_accepted())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().map(|d| d.report.warnings.len()).sum()
    }
}

pub struct GenerateService {
    store: Box<dyn TemplateStore>,
    validators: Vec<Box<dyn ArtifactValidator>>,
    filesystem: Arc<dyn Filesystem>,
}

impl GenerateService {
    /// Create a generate service with the given adapters.
    ///
    /// One validator per `ArtifactKind` is expected; a kind without one
    /// fails the run with `AdapterNotConfigured`.
    pub fn new(
        store: Box<dyn TemplateStore>,
        validators: Vec<Box<dyn ArtifactValidator>>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            validators,
            filesystem,
        }
    }

    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    /// Generate the artifacts for `profile`.
    ///
    /// Returns container, pipeline and ignore file in that order, minus any
    /// artifact its validator rejected.
    pub fn generate(
        &self,
        profile: &ProjectProfile,
        options: &GenerateOptions,
    ) -> CicdResult<Vec<Artifact>> {
        Ok(self.generate_report(profile, options)?.artifacts)
    }

    /// Like [`generate`](Self::generate) but also returns the diagnostics.
    #[instrument(
        skip_all,
        fields(
            project = %profile.name(),
            framework = %profile.framework(),
            output_dir = %options.output_dir.display(),
            dry_run = options.dry_run
        )
    )]
    pub fn generate_report(
        &self,
        profile: &ProjectProfile,
        options: &GenerateOptions,
    ) -> CicdResult<GenerationReport> {
        info!("Generating deployment files for {}", profile);

        if !options.dry_run {
            self.filesystem.create_dir_all(&options.output_dir)?;
        }

        let mut report = GenerationReport {
            existing: self.existing_files(profile.path()),
            output_dir: (!options.dry_run).then(|| options.output_dir.clone()),
            ..GenerationReport::default()
        };

        for kind in ArtifactKind::ALL {
            let id = routing::select(kind, profile);
            let (artifact, validation) = self.render_and_validate(&id, profile)?;

            let diagnostics = ArtifactDiagnostics {
                kind,
                template: id.to_string(),
                filename: artifact.filename().to_string(),
                report: validation,
            };

            if diagnostics.is_accepted() {
                self.persist(&artifact, options)?;
                report.artifacts.push(artifact);
            } else {
                warn!(
                    file = %diagnostics.filename,
                    errors = ?diagnostics.report.errors,
                    "Generated file failed validation, skipping"
                );
            }
            report.diagnostics.push(diagnostics);
        }

        let ignore = ignore_file::generate(profile);
        self.persist(&ignore, options)?;
        report.artifacts.push(ignore);

        info!(
            files = report.artifacts.len(),
            warnings = report.warning_count(),
            "Generation completed"
        );
        Ok(report)
    }

    /// Render the template `id` and run its validator.
    pub fn render_and_validate(
        &self,
        id: &TemplateId,
        profile: &ProjectProfile,
    ) -> CicdResult<(Artifact, ValidationReport)> {
        let content = self.store.render(id, profile)?;
        debug!(template = %id, bytes = content.len(), "Template rendered");

        let validation = self.validator(id.kind())?.validate(&content);
        for warning in &validation.warnings {
            warn!(template = %id, "{warning}");
        }

        Ok((Artifact::new(id.kind().filename(), content), validation))
    }

    /// Validate existing content with the validator for `kind`.
    pub fn validate(&self, kind: ArtifactKind, content: &str) -> CicdResult<ValidationReport> {
        Ok(self.validator(kind)?.validate(content))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validator(&self, kind: ArtifactKind) -> CicdResult<&dyn ArtifactValidator> {
        self.validators
            .iter()
            .find(|v| v.kind() == kind)
            .map(|v| &**v)
            .ok_or_else(|| {
                ApplicationError::AdapterNotConfigured {
                    name: match kind {
                        ArtifactKind::Container => "container validator",
                        ArtifactKind::Pipeline => "pipeline validator",
                    },
                }
                .into()
            })
    }

    fn existing_files(&self, project: &Path) -> Vec<PathBuf> {
        ArtifactKind::ALL
            .iter()
            .map(|kind| project.join(kind.filename()))
            .filter(|path| self.filesystem.exists(path))
            .inspect(|path| {
                info!(
                    "Project already has {}; the generated copy will not replace it",
                    path.display()
                )
            })
            .collect()
    }

    fn persist(&self, artifact: &Artifact, options: &GenerateOptions) -> CicdResult<()> {
        if options.dry_run {
            debug!(file = artifact.filename(), "Dry run, not writing");
            return Ok(());
        }
        let path = options.output_dir.join(artifact.filename());
        self.filesystem.write_file(&path, artifact.content())?;
        debug!(path = %path.display(), "Wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{Framework, Template};
    use crate::error::CicdError;

    struct MapStore {
        templates: RwLock<BTreeMap<TemplateId, Template>>,
    }

    impl MapStore {
        fn with(kinds: &[(ArtifactKind, &'static str, &'static str)]) -> Self {
            let templates = kinds
                .iter()
                .map(|(kind, name, body)| {
                    let t = Template::builtin(*kind, *name, "", *body).unwrap();
                    (t.id().clone(), t)
                })
                .collect();
            Self {
                templates: RwLock::new(templates),
            }
        }
    }

    impl TemplateStore for MapStore {
        fn get(&self, id: &TemplateId) -> CicdResult<Template> {
            self.templates
                .read()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.clone() }.into())
        }

        fn list(&self) -> CicdResult<Vec<Template>> {
            Ok(self.templates.read().unwrap().values().cloned().collect())
        }

        fn insert(&self, template: Template) -> CicdResult<()> {
            self.templates
                .write()
                .unwrap()
                .insert(template.id().clone(), template);
            Ok(())
        }
    }

    struct FixedValidator {
        kind: ArtifactKind,
        accept: bool,
    }

    impl ArtifactValidator for FixedValidator {
        fn kind(&self) -> ArtifactKind {
            self.kind
        }

        fn validate(&self, _content: &str) -> ValidationReport {
            let mut report = ValidationReport::new();
            report.warn("checked");
            if !self.accept {
                report.error("rejected");
            }
            report
        }
    }

    fn validators(container: bool, pipeline: bool) -> Vec<Box<dyn ArtifactValidator>> {
        vec![
            Box::new(FixedValidator {
                kind: ArtifactKind::Container,
                accept: container,
            }),
            Box::new(FixedValidator {
                kind: ArtifactKind::Pipeline,
                accept: pipeline,
            }),
        ]
    }

    fn store() -> Box<dyn TemplateStore> {
        Box::new(MapStore::with(&[
            (ArtifactKind::Container, "basic", "FROM node:{{nodeVersion}}\nEXPOSE {{port}}\n"),
            (ArtifactKind::Pipeline, "basic", "image: node:{{nodeVersion}}\n"),
        ]))
    }

    fn profile() -> ProjectProfile {
        ProjectProfile::builder("nodejs", "/proj")
            .framework(Framework::Node)
            .build()
            .unwrap()
    }

    fn writing_fs(writes: usize) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().times(1).returning(|_| Ok(()));
        fs.expect_write_file()
            .times(writes)
            .returning(|_, _| Ok(()));
        fs
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            output_dir: PathBuf::from("/out"),
            dry_run: false,
        }
    }

    #[test]
    fn produces_three_artifacts_in_order() {
        let service = GenerateService::new(store(), validators(true, true), Arc::new(writing_fs(3)));

        let artifacts = service.generate(&profile(), &options()).unwrap();

        let names: Vec<_> = artifacts.iter().map(Artifact::filename).collect();
        assert_eq!(names, vec!["Dockerfile", ".gitlab-ci.yml", ".dockerignore"]);
        assert_eq!(artifacts[0].content(), "FROM node:18\nEXPOSE 3000\n");
    }

    #[test]
    fn rejected_pipeline_is_omitted_not_fatal() {
        let service = GenerateService::new(store(), validators(true, false), Arc::new(writing_fs(2)));

        let report = service.generate_report(&profile(), &options()).unwrap();

        let names: Vec<_> = report.artifacts.iter().map(Artifact::filename).collect();
        assert_eq!(names, vec!["Dockerfile", ".dockerignore"]);
        let rejected: Vec<_> = report.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].filename, ".gitlab-ci.yml");
        assert!(matches!(
            rejected[0].rejection(),
            Some(ApplicationError::ValidationRejected { .. })
        ));
    }

    #[test]
    fn missing_template_aborts_the_run() {
        let store = Box::new(MapStore::with(&[(
            ArtifactKind::Pipeline,
            "basic",
            "image: node\n",
        )]));
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(0);
        let service = GenerateService::new(store, validators(true, true), Arc::new(fs));

        let err = service.generate(&profile(), &options()).unwrap_err();
        assert!(matches!(
            err,
            CicdError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().times(0);
        fs.expect_write_file().times(0);
        let service = GenerateService::new(store(), validators(true, true), Arc::new(fs));

        let report = service
            .generate_report(
                &profile(),
                &GenerateOptions {
                    dry_run: true,
                    ..options()
                },
            )
            .unwrap();

        assert_eq!(report.artifacts.len(), 3);
        assert_eq!(report.output_dir, None);
    }

    #[test]
    fn writes_into_output_dir() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("/out"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p.starts_with("/out"))
            .times(3)
            .returning(|_, _| Ok(()));
        let service = GenerateService::new(store(), validators(true, true), Arc::new(fs));

        service.generate(&profile(), &options()).unwrap();
    }

    #[test]
    fn reports_existing_project_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/proj/Dockerfile"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let service = GenerateService::new(store(), validators(true, true), Arc::new(fs));

        let report = service.generate_report(&profile(), &options()).unwrap();
        assert_eq!(report.existing, vec![PathBuf::from("/proj/Dockerfile")]);
    }

    #[test]
    fn missing_validator_is_adapter_not_configured() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let only_container: Vec<Box<dyn ArtifactValidator>> = vec![Box::new(FixedValidator {
            kind: ArtifactKind::Container,
            accept: true,
        })];
        let service = GenerateService::new(store(), only_container, Arc::new(fs));

        let err = service.generate(&profile(), &options()).unwrap_err();
        assert!(matches!(
            err,
            CicdError::Application(ApplicationError::AdapterNotConfigured { .. })
        ));
    }
}
