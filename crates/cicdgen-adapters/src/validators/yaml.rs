//! YAML validator for pipeline definitions.

use thiserror::Error;
use tracing::debug;

use cicdgen_core::{
    application::ports::ArtifactValidator,
    domain::{ArtifactKind, ValidationReport},
};

/// Why a document failed [`YamlValidator::validate_structure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("invalid YAML: {0}")]
    Parse(String),

    #[error("document root is not a mapping")]
    NotAMapping,

    #[error("missing required key: {0}")]
    MissingKey(String),
}

/// Accepts any well-formed YAML document.
///
/// On a parse failure the parser's message is the only diagnostic. No
/// pipeline-specific rules are applied here; see
/// [`validate_structure`](Self::validate_structure) for key checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlValidator;

impl YamlValidator {
    /// Check that `content` is a mapping with a non-null, non-empty value for
    /// every key in `required`.
    pub fn validate_structure(content: &str, required: &[&str]) -> Result<(), StructureError> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| StructureError::Parse(e.to_string()))?;
        let mapping = document.as_mapping().ok_or(StructureError::NotAMapping)?;

        for key in required {
            let present = mapping.get(*key).is_some_and(|value| match value {
                serde_yaml::Value::Null => false,
                serde_yaml::Value::String(s) => !s.is_empty(),
                serde_yaml::Value::Sequence(s) => !s.is_empty(),
                serde_yaml::Value::Mapping(m) => !m.is_empty(),
                _ => true,
            });
            if !present {
                return Err(StructureError::MissingKey((*key).to_string()));
            }
        }
        Ok(())
    }
}

impl ArtifactValidator for YamlValidator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Pipeline
    }

    fn validate(&self, content: &str) -> ValidationReport {
        match serde_yaml::from_str::<serde_yaml::Value>(content) {
            Ok(_) => ValidationReport::new(),
            Err(e) => {
                debug!(error = %e, "YAML parse failed");
                ValidationReport::rejected(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_yaml() {
        let report = YamlValidator.validate("stages:\n  - build\nbuild:\n  script:\n    - make\n");
        assert!(report.is_accepted());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_with_parser_message_only() {
        let report = YamlValidator.validate("stages: [build\n");
        assert!(!report.is_accepted());
        assert_eq!(report.errors.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn structure_requires_keys() {
        let doc = "image: node:18\nstages:\n  - test\n";
        assert_eq!(YamlValidator::validate_structure(doc, &["image", "stages"]), Ok(()));
        assert_eq!(
            YamlValidator::validate_structure(doc, &["variables"]),
            Err(StructureError::MissingKey("variables".into()))
        );
    }

    #[test]
    fn structure_rejects_non_mapping() {
        assert_eq!(
            YamlValidator::validate_structure("- a\n- b\n", &[]),
            Err(StructureError::NotAMapping)
        );
        assert!(matches!(
            YamlValidator::validate_structure("key: [", &[]),
            Err(StructureError::Parse(_))
        ));
    }
}
