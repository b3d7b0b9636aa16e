//! `.dockerignore` generation.
//!
//! Computed directly from the profile; no template and no validation.

use crate::domain::{
    entities::{Artifact, ProjectProfile},
    value_objects::Framework,
};

pub const IGNORE_FILENAME: &str = ".dockerignore";

const BASE_PATTERNS: &[&str] = &[
    "node_modules",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    ".git",
    ".gitignore",
    "README.md",
    ".env",
    ".nyc_output",
    "coverage",
    ".vscode",
    ".idea",
];

/// Ignore patterns for `framework`, base list first.
pub fn patterns(framework: &Framework) -> Vec<&'static str> {
    let mut patterns = BASE_PATTERNS.to_vec();
    match framework {
        Framework::Next => patterns.push(".next"),
        Framework::React => patterns.push("build"),
        _ => {}
    }
    patterns
}

/// The ignore-file artifact for `profile`.
pub fn generate(profile: &ProjectProfile) -> Artifact {
    Artifact::new(IGNORE_FILENAME, patterns(profile.framework()).join("\n"))
}
