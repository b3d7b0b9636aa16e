//! Integration tests for the `cicdgen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const REACT_MANIFEST: &str = r#"{
  "name": "storefront",
  "version": "2.0.0",
  "scripts": { "build": "react-scripts build", "start": "react-scripts start" },
  "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" }
}"#;

const EXPRESS_MANIFEST: &str = r#"{
  "name": "orders",
  "engines": { "node": ">=20" },
  "scripts": { "start": "PORT=5000 node server.js", "test": "jest" },
  "dependencies": { "express": "^4.18.2" }
}"#;

/// A command running in `dir` that ignores the caller's config and env.
fn cicdgen(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("cicdgen");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("CICDGEN_TEMPLATES_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn project(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("app")).unwrap();
    fs::write(temp.path().join("app/package.json"), manifest).unwrap();
    temp
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    cicdgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    cicdgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_three_files() {
    let temp = project(REACT_MANIFEST);

    cicdgen(temp.path())
        .args(["generate", "--path", "app", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 files"))
        .stdout(predicate::str::contains("Dockerfile"));

    let out = temp.path().join("out");
    let dockerfile = fs::read_to_string(out.join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("nginx"));
    assert!(dockerfile.contains("EXPOSE 80"));
    assert!(out.join(".gitlab-ci.yml").is_file());
    assert!(out.join(".dockerignore").is_file());
}

#[test]
fn generate_defaults_to_generated_dir() {
    let temp = project(EXPRESS_MANIFEST);

    cicdgen(temp.path().join("app").as_path())
        .arg("gen")
        .assert()
        .success();

    let dockerfile =
        fs::read_to_string(temp.path().join("app/generated/Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM node:20-alpine"));
    assert!(dockerfile.contains("EXPOSE 5000"));
}

#[test]
fn config_file_sets_output_dir() {
    let temp = project(EXPRESS_MANIFEST);
    fs::write(
        temp.path().join(".cicdgen.toml"),
        "[generate]\noutput_dir = \"deploy\"\n",
    )
    .unwrap();

    cicdgen(temp.path())
        .args(["generate", "-p", "app"])
        .assert()
        .success();

    assert!(temp.path().join("deploy/.gitlab-ci.yml").is_file());
}

#[test]
fn no_dry_run_flag_beats_config() {
    let temp = project(EXPRESS_MANIFEST);
    fs::write(
        temp.path().join(".cicdgen.toml"),
        "[generate]\noutput_dir = \"out\"\ndry_run = true\n",
    )
    .unwrap();

    cicdgen(temp.path())
        .args(["generate", "-p", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));
    assert!(!temp.path().join("out").exists());

    cicdgen(temp.path())
        .args(["generate", "-p", "app", "--no-dry-run"])
        .assert()
        .success();
    assert!(temp.path().join("out/Dockerfile").is_file());
}

#[test]
fn dry_run_writes_nothing_and_prints_content() {
    let temp = project(REACT_MANIFEST);

    cicdgen(temp.path())
        .args(["generate", "-p", "app", "-o", "out", "--dry-run", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("FROM node:18-alpine AS builder"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn generate_json_report() {
    let temp = project(REACT_MANIFEST);

    let assert = cicdgen(temp.path())
        .args(["--output-format", "json", "generate", "-p", "app", "--dry-run"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["artifacts"].as_array().unwrap().len(), 3);
    assert!(report["output_dir"].is_null());
}

#[test]
fn template_override_replaces_builtin() {
    let temp = project(REACT_MANIFEST);
    let overrides = temp.path().join("tpl/container");
    fs::create_dir_all(&overrides).unwrap();
    fs::write(
        overrides.join("react.tmpl"),
        "FROM nginx:stable AS web\nWORKDIR /srv\nUSER nginx\nEXPOSE 8080\nCMD [\"nginx\"]\n# {{appName}}\n",
    )
    .unwrap();

    cicdgen(temp.path())
        .args(["generate", "-p", "app", "-o", "out", "--templates", "tpl"])
        .assert()
        .success();

    let dockerfile = fs::read_to_string(temp.path().join("out/Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 8080"));
    assert!(dockerfile.contains("# storefront"));
}

#[test]
fn analyze_prints_summary() {
    let temp = project(EXPRESS_MANIFEST);

    cicdgen(temp.path())
        .args(["analyze", "--path", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Framework: express"))
        .stdout(predicate::str::contains("Package manager: npm"))
        .stdout(predicate::str::contains("Node.js version: 20"))
        .stdout(predicate::str::contains("Port: 5000"));
}

#[test]
fn analyze_json_is_full_profile() {
    let temp = project(EXPRESS_MANIFEST);

    let assert = cicdgen(temp.path())
        .args(["analyze", "-p", "app", "--output-format", "json"])
        .assert()
        .success();

    let profile: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(profile["type"], "nodejs");
    assert_eq!(profile["framework"], "express");
    assert_eq!(profile["port"], 5000);
    assert_eq!(profile["hasTests"], true);
}

#[test]
fn validate_accepts_generated_files() {
    let temp = project(REACT_MANIFEST);

    cicdgen(temp.path())
        .args(["generate", "-p", "app", "-o", "out"])
        .assert()
        .success();

    cicdgen(temp.path())
        .args(["validate", "--path", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile is valid"))
        .stdout(predicate::str::contains(".gitlab-ci.yml is valid"));
}

#[test]
fn templates_lists_both_kinds() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("container templates"))
        .stdout(predicate::str::contains("pipeline templates"))
        .stdout(predicate::str::contains("fullstack"));
}

#[test]
fn templates_list_format_filters_by_kind() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["ls", "--kind", "container", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("container/nextjs"))
        .stdout(predicate::str::contains("pipeline/").not());
}

#[test]
fn init_local_then_config_get() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();
    assert!(temp.path().join(".cicdgen.toml").is_file());

    cicdgen(temp.path())
        .args(["config", "get", "generate.output_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("./generated"));
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cicdgen"));
}
