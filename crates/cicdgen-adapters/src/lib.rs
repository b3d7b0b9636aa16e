//! Infrastructure adapters for cicdgen.
//!
//! This crate implements the ports defined in `cicdgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod detectors;
pub mod filesystem;
pub mod template_loader;
pub mod template_store;
pub mod validators;

// Re-export commonly used adapters
pub use detectors::{NodeJsDetector, builtin_detectors};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_store::InMemoryStore;
pub use validators::{DockerfileValidator, YamlValidator, builtin_validators};
