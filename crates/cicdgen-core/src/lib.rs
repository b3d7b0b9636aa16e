//! cicdgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for cicdgen, which
//! inspects a project, classifies its stack and renders a Dockerfile, a
//! GitLab CI pipeline and a `.dockerignore` for it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cicdgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProfileResolver, GenerateService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Detector, TemplateStore,   │
//! │  ArtifactValidator)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cicdgen-adapters (Infrastructure)    │
//! │ (LocalFilesystem, NodeJsDetector,       │
//! │  InMemoryStore, Dockerfile/Yaml checks) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectProfile, Template, routing)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cicdgen_core::application::{GenerateOptions, GenerateService, ProfileResolver};
//!
//! # fn run(resolver: ProfileResolver, generator: GenerateService) -> cicdgen_core::error::CicdResult<()> {
//! let profile = resolver.resolve(Path::new("./my-app"))?;
//! let artifacts = generator.generate(&profile, &GenerateOptions::default())?;
//! for artifact in &artifacts {
//!     println!("{}", artifact.filename());
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DetectorRegistry, GenerateOptions, GenerateService, GenerationReport, ProfileResolver,
        TemplateInfo, TemplateService,
        ports::{ArtifactValidator, Detector, Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        Artifact, ArtifactKind, Framework, PackageManager, ProjectProfile, Template, TemplateId,
        TemplateSource, ValidationReport,
    };
    pub use crate::error::{CicdError, CicdResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
