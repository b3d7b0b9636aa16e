//! Domain value objects: Framework, PackageManager, ArtifactKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold NO routing logic; which template a framework maps to lives in
//! `routing.rs`. This file only defines the types, their string forms and
//! their parsers.
//!
//! # Adding a Framework
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `From<&str>` arm here
//! 3. Add its routing arms in `routing.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Framework ────────────────────────────────────────────────────────────────

/// The application framework a project is built on.
///
/// Known frameworks get their own variant; anything else is kept verbatim in
/// `Other` so routing falls through to the generic templates instead of
/// failing on a tag nobody anticipated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Framework {
    /// Plain Node.js, no recognised framework dependency.
    Node,
    React,
    Vue,
    Next,
    Express,
    Fastify,
    Koa,
    Other(String),
}

impl Framework {
    /// Framework dependency keys in detection priority order.
    ///
    /// `next` comes before `react` because every Next.js app also depends on
    /// React.
    pub const DETECTION_ORDER: [Framework; 6] = [
        Self::Next,
        Self::React,
        Self::Vue,
        Self::Express,
        Self::Fastify,
        Self::Koa,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Node => "node",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Next => "next",
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::Koa => "koa",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is a recognised framework rather than a raw tag.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Framework {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "nodejs" => Self::Node,
            "react" => Self::React,
            "vue" => Self::Vue,
            "next" | "nextjs" => Self::Next,
            "express" => Self::Express,
            "fastify" => Self::Fastify,
            "koa" => Self::Koa,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for Framework {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Framework> for String {
    fn from(f: Framework) -> Self {
        f.as_str().to_string()
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// The package manager used to install dependencies and run scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Lock file whose presence identifies this package manager.
    pub const fn lock_file(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::UnknownValue {
                kind: "package manager",
                value: other.to_string(),
            }),
        }
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// A family of generated artifacts. Each kind has its own template set,
/// routing table and validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Container build file (`Dockerfile`).
    Container,
    /// CI pipeline definition (`.gitlab-ci.yml`).
    Pipeline,
}

impl ArtifactKind {
    /// All template-backed kinds, in generation order.
    pub const ALL: [ArtifactKind; 2] = [Self::Container, Self::Pipeline];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Pipeline => "pipeline",
        }
    }

    /// File name the artifact is written under.
    pub const fn filename(&self) -> &'static str {
        match self {
            Self::Container => "Dockerfile",
            Self::Pipeline => ".gitlab-ci.yml",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "container" | "docker" | "dockerfile" => Ok(Self::Container),
            "pipeline" | "ci" | "gitlab" | "gitlab-ci" => Ok(Self::Pipeline),
            other => Err(DomainError::UnknownValue {
                kind: "artifact kind",
                value: other.to_string(),
            }),
        }
    }
}
