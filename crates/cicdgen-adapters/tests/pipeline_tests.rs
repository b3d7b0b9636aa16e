//! End-to-end tests: detector, store and validators wired into the core
//! services over an in-memory filesystem.

use std::path::Path;
use std::sync::Arc;

use cicdgen_adapters::{
    InMemoryStore, MemoryFilesystem, YamlValidator, builtin_detectors, builtin_validators,
};
use cicdgen_core::prelude::*;

const ROOT: &str = "/work/app";
const OUT: &str = "/work/app/generated";

fn project(manifest: &str) -> MemoryFilesystem {
    MemoryFilesystem::new().with_file(Path::new(ROOT).join("package.json"), manifest)
}

fn services(fs: &MemoryFilesystem, store: InMemoryStore) -> (ProfileResolver, GenerateService) {
    let fs: Arc<dyn Filesystem> = Arc::new(fs.clone());
    let mut registry = DetectorRegistry::new();
    registry.load(builtin_detectors());

    (
        ProfileResolver::new(registry, fs.clone()),
        GenerateService::new(Box::new(store), builtin_validators(), fs),
    )
}

fn options() -> GenerateOptions {
    GenerateOptions {
        output_dir: OUT.into(),
        dry_run: false,
    }
}

fn file(fs: &MemoryFilesystem, name: &str) -> String {
    fs.read_file(&Path::new(OUT).join(name))
        .unwrap_or_else(|| panic!("{name} was not written"))
}

#[test]
fn react_project_gets_nginx_image_on_port_80() {
    let fs = project(
        r#"{
            "name": "storefront",
            "scripts": { "build": "react-scripts build", "start": "react-scripts start" },
            "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" }
        }"#,
    );
    let (resolver, generator) = services(&fs, InMemoryStore::with_builtin().unwrap());

    let profile = resolver.resolve(Path::new(ROOT)).unwrap();
    let report = generator.generate_report(&profile, &options()).unwrap();

    assert_eq!(report.artifacts.len(), 3);
    assert_eq!(report.rejected().count(), 0);

    let dockerfile = file(&fs, "Dockerfile");
    assert!(dockerfile.contains("FROM node:18-alpine AS builder"));
    assert!(dockerfile.contains("nginx"));
    assert!(dockerfile.contains("EXPOSE 80\n"));
    assert!(!dockerfile.contains("EXPOSE 3000"));

    let pipeline = file(&fs, ".gitlab-ci.yml");
    assert!(pipeline.contains("lint_code:"));
    assert!(pipeline.contains("https://staging-storefront.example.com"));

    let ignore = file(&fs, ".dockerignore");
    assert!(ignore.lines().any(|l| l == "build"));
}

#[test]
fn next_project_gets_fullstack_pipeline_and_runner_stage() {
    let fs = project(
        r#"{
            "name": "portal",
            "engines": { "node": ">=20.0.0" },
            "scripts": { "build": "next build", "start": "next start" },
            "dependencies": { "next": "14.1.0", "react": "^18.2.0" }
        }"#,
    )
    .with_file(Path::new(ROOT).join("yarn.lock"), "");
    let (resolver, generator) = services(&fs, InMemoryStore::with_builtin().unwrap());

    let profile = resolver.resolve(Path::new(ROOT)).unwrap();
    assert_eq!(profile.framework(), &Framework::Next);
    generator.generate(&profile, &options()).unwrap();

    let dockerfile = file(&fs, "Dockerfile");
    assert!(dockerfile.contains("FROM node:20-alpine AS runner"));
    assert!(dockerfile.contains("NEXT_TELEMETRY_DISABLED"));
    assert!(dockerfile.contains("RUN yarn run build"));

    let pipeline = file(&fs, ".gitlab-ci.yml");
    assert!(pipeline.contains("type_check:"));
    assert!(pipeline.contains(".next/cache/"));
    assert!(pipeline.contains("image: node:20\n"));

    assert!(file(&fs, ".dockerignore").lines().any(|l| l == ".next"));
}

#[test]
fn express_api_uses_detected_port_and_backend_pipeline() {
    let fs = project(
        r#"{
            "name": "orders",
            "scripts": { "start": "PORT=5000 node server.js", "test": "jest" },
            "dependencies": { "express": "^4.18.2" }
        }"#,
    );
    let (resolver, generator) = services(&fs, InMemoryStore::with_builtin().unwrap());

    let profile = resolver.resolve(Path::new(ROOT)).unwrap();
    assert_eq!(profile.port(), 5000);
    generator.generate(&profile, &options()).unwrap();

    let dockerfile = file(&fs, "Dockerfile");
    assert!(dockerfile.contains("EXPOSE 5000"));
    assert!(dockerfile.contains("http://localhost:5000/health"));
    assert!(dockerfile.contains("# No build step required"));
    assert!(dockerfile.contains(r#"CMD ["npm", "run", "start"]"#));

    let pipeline = file(&fs, ".gitlab-ci.yml");
    assert!(pipeline.contains("npm audit --audit-level moderate"));
    assert!(pipeline.contains("https://api-orders.example.com"));
}

#[test]
fn every_builtin_renders_cleanly_and_passes_its_validator() {
    let store = InMemoryStore::with_builtin().unwrap();
    let validators = builtin_validators();
    let profile = ProjectProfile::builder("nodejs", ROOT)
        .name("demo")
        .build_command(Some("build"))
        .start_command(Some("start"))
        .build()
        .unwrap();

    for template in store.list().unwrap() {
        let rendered = template.render(&profile);
        assert!(!rendered.contains("{{"), "{} left a token", template.id());

        let validator = validators
            .iter()
            .find(|v| v.kind() == template.id().kind())
            .unwrap();
        let report = validator.validate(&rendered);
        assert!(
            report.is_accepted(),
            "{} rejected: {:?}",
            template.id(),
            report.errors
        );
    }
}

#[test]
fn builtin_pipelines_have_core_keys() {
    let store = InMemoryStore::with_builtin().unwrap();
    let profile = ProjectProfile::builder("nodejs", ROOT).build().unwrap();

    for template in store.list().unwrap() {
        if template.id().kind() != ArtifactKind::Pipeline {
            continue;
        }
        let rendered = template.render(&profile);
        assert_eq!(
            YamlValidator::validate_structure(&rendered, &["image", "stages", "variables"]),
            Ok(()),
            "{}",
            template.id()
        );
    }
}

#[test]
fn rejected_pipeline_is_omitted_and_run_continues() {
    let fs = project(r#"{ "name": "plain" }"#);
    let store = InMemoryStore::with_builtin().unwrap();
    store
        .insert(
            Template::new(
                TemplateId::new(ArtifactKind::Pipeline, "basic"),
                TemplateSource::Owned("stages: [{{appName}}\n".into()),
            )
            .unwrap(),
        )
        .unwrap();
    let (resolver, generator) = services(&fs, store);

    let profile = resolver.resolve(Path::new(ROOT)).unwrap();
    let report = generator.generate_report(&profile, &options()).unwrap();

    let names: Vec<&str> = report.artifacts.iter().map(|a| a.filename()).collect();
    assert_eq!(names, vec!["Dockerfile", ".dockerignore"]);

    let rejected: Vec<_> = report.rejected().collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].kind, ArtifactKind::Pipeline);
    assert!(fs.read_file(&Path::new(OUT).join(".gitlab-ci.yml")).is_none());
}

#[test]
fn dry_run_writes_nothing() {
    let fs = project(r#"{ "name": "plain" }"#);
    let (resolver, generator) = services(&fs, InMemoryStore::with_builtin().unwrap());

    let profile = resolver.resolve(Path::new(ROOT)).unwrap();
    let report = generator
        .generate_report(
            &profile,
            &GenerateOptions {
                output_dir: OUT.into(),
                dry_run: true,
            },
        )
        .unwrap();

    assert_eq!(report.artifacts.len(), 3);
    assert_eq!(report.output_dir, None);
    assert_eq!(fs.list_files(), vec![Path::new(ROOT).join("package.json")]);
}

#[test]
fn directory_without_manifest_is_unclassified() {
    let fs = MemoryFilesystem::new().with_file(Path::new(ROOT).join("README.md"), "# hi");
    let (resolver, _) = services(&fs, InMemoryStore::new());

    let err = resolver.resolve(Path::new(ROOT)).unwrap_err();
    assert!(err.to_string().contains("Could not determine the project type"));
}
