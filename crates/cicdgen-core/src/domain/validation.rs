use serde::Serialize;

/// Outcome of checking one rendered artifact.
///
/// Errors block acceptance; warnings are reported and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report rejecting the content with a single error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }
}
