//! Generated artifacts.

use serde::Serialize;

/// A generated file: its name and full text.
///
/// Produced by one render and validate cycle and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    filename: String,
    content: String,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
