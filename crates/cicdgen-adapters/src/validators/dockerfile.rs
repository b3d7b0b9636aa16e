//! Dockerfile validator.
//!
//! Works on instructions rather than raw text: comments are dropped and
//! backslash continuations are folded into the instruction they belong to,
//! so a `CMD` inside a `HEALTHCHECK` continuation does not count as the
//! image's run directive.

use tracing::debug;

use cicdgen_core::{
    application::ports::ArtifactValidator,
    domain::{ArtifactKind, ValidationReport},
};

/// A single Dockerfile instruction with continuations folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Upper-cased keyword, e.g. `FROM`.
    pub keyword: String,
    /// Everything after the keyword, trimmed.
    pub arguments: String,
}

impl Instruction {
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword == keyword
    }
}

/// Split `content` into instructions.
pub fn parse(content: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pending = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if pending.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        match trimmed.strip_suffix('\\') {
            Some(head) => {
                pending.push_str(head);
                pending.push(' ');
            }
            None => {
                pending.push_str(trimmed);
                instructions.extend(instruction(&pending));
                pending.clear();
            }
        }
    }

    if !pending.is_empty() {
        instructions.extend(instruction(&pending));
    }

    instructions
}

fn instruction(line: &str) -> Option<Instruction> {
    let line = line.trim();
    let (keyword, arguments) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if keyword.is_empty() {
        return None;
    }
    Some(Instruction {
        keyword: keyword.to_ascii_uppercase(),
        arguments: arguments.trim().to_string(),
    })
}

/// Validates rendered Dockerfiles.
///
/// Errors (reject):
/// - no `FROM`
/// - no `CMD` or `ENTRYPOINT`
///
/// Warnings:
/// - no `WORKDIR`
/// - no `EXPOSE`
/// - a `node:` base image without any `AS` stage alias
/// - no `USER`, or `root` as the last one
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerfileValidator;

impl ArtifactValidator for DockerfileValidator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Container
    }

    fn validate(&self, content: &str) -> ValidationReport {
        let instructions = parse(content);
        let has = |keyword: &str| instructions.iter().any(|i| i.is(keyword));
        let from: Vec<&Instruction> = instructions.iter().filter(|i| i.is("FROM")).collect();

        let mut report = ValidationReport::new();

        if from.is_empty() {
            report.error("Dockerfile must contain a FROM instruction");
        }
        if !has("CMD") && !has("ENTRYPOINT") {
            report.error("Dockerfile must contain CMD or ENTRYPOINT");
        }

        if !has("WORKDIR") {
            report.warn("Consider setting a WORKDIR");
        }
        if !has("EXPOSE") {
            report.warn("Consider declaring the application port with EXPOSE");
        }

        let uses_node_image = from.iter().any(|i| i.arguments.contains("node:"));
        let has_stage_alias = from.iter().any(|i| {
            i.arguments
                .split_whitespace()
                .any(|word| word.eq_ignore_ascii_case("AS"))
        });
        if uses_node_image && !has_stage_alias {
            report.warn("Consider a multi-stage build to keep the runtime image small");
        }

        let last_user = instructions
            .iter()
            .rev()
            .find(|i| i.is("USER"))
            .map(|i| i.arguments.as_str());
        if last_user.is_none_or(|u| u == "root" || u.starts_with("root:")) {
            report.warn("Consider running as a non-root USER");
        }

        debug!(
            instructions = instructions.len(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Dockerfile validated"
        );
        report
    }
}
