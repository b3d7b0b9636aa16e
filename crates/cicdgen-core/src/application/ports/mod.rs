//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cicdgen-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: existence probes, reads, writes
//!   - `Detector`: recognise a project kind and build its profile
//!   - `TemplateStore`: template storage, retrieval and rendering
//!   - `ArtifactValidator`: accept or reject rendered text
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArtifactValidator, Detector, Filesystem, TemplateStore};

#[cfg(test)]
pub use output::MockFilesystem;
