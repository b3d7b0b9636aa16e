//! Exit codes and suggestions for failing invocations.

use std::fs;
use std::path::Path;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

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

#[test]
fn no_arguments_is_usage_error() {
    let temp = TempDir::new().unwrap();
    cicdgen(temp.path()).assert().code(2);
}

#[test]
fn missing_project_exits_with_not_found() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["generate", "--path", "does-not-exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project not found"))
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn unsupported_project_is_user_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();

    cicdgen(temp.path())
        .arg("analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not determine the project type"))
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn malformed_manifest_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), "{ not json").unwrap();

    cicdgen(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));
    assert!(!temp.path().join("generated").exists());
}

#[test]
fn validate_rejects_dockerfile_without_from() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Dockerfile"), "WORKDIR /app\nCMD [\"node\"]\n").unwrap();

    cicdgen(temp.path())
        .arg("validate")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Dockerfile is invalid"))
        .stdout(predicate::str::contains("FROM"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn validate_with_nothing_to_check() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .arg("validate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Nothing to validate"));
}

#[test]
fn missing_template_dir_is_user_error() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["templates", "--templates", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("template directory"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["--config", "missing.toml", "templates"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_config_key() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn verbose_error_drops_hint() {
    let temp = TempDir::new().unwrap();

    cicdgen(temp.path())
        .args(["-v", "analyze", "-p", "missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
