// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cicdgen.
//!
//! Pure logic only. Reading manifests, loading templates and writing files
//! happen behind ports defined in the application layer.
//!
//! - **No I/O**: profiles arrive fully built, artifacts leave as text
//! - **Immutable values**: profiles, templates and artifacts never change
//!   after construction
//! - **Closed token set**: the template engine knows six placeholders and
//!   one fragment, nothing more
pub mod entities;
pub mod error;
pub mod ignore_file;
pub mod routing;
pub mod validation;
pub mod value_objects;

pub use entities::{
    Artifact, Fragment, FragmentChoice, Placeholder, ProfileSummary, ProjectProfile,
    ProjectProfileBuilder, Template, TemplateId, TemplateSource,
};

pub use error::{DomainError, ErrorCategory};

pub use validation::ValidationReport;

pub use value_objects::{ArtifactKind, Framework, PackageManager};
