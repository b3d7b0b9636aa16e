//! Artifact validators, one per artifact kind.

mod dockerfile;
mod yaml;

use cicdgen_core::application::ports::ArtifactValidator;

pub use dockerfile::{DockerfileValidator, Instruction};
pub use yaml::{StructureError, YamlValidator};

/// One validator for every template-backed artifact kind.
pub fn builtin_validators() -> Vec<Box<dyn ArtifactValidator>> {
    vec![Box::new(DockerfileValidator), Box::new(YamlValidator)]
}
