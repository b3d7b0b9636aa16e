//! Application layer for cicdgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProfileResolver, GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Routing, rendering and ignore-file rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactDiagnostics, DetectorRegistry, GenerateOptions, GenerateService, GenerationReport,
    ProfileResolver, TemplateInfo, TemplateService,
};

pub use ports::{ArtifactValidator, Detector, Filesystem, TemplateStore};

pub use error::{ApplicationError, IoFailureKind};
