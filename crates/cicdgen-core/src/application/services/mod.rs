//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "analyze a project" or "generate its files".

pub mod detector_registry;
pub mod generate_service;
pub mod profile_resolver;
pub mod template_service;

pub use detector_registry::DetectorRegistry;
pub use generate_service::{
    ArtifactDiagnostics, GenerateOptions, GenerateService, GenerationReport,
};
pub use profile_resolver::ProfileResolver;
pub use template_service::{TemplateInfo, TemplateService};
