//! Template Service - template queries for the CLI.

use serde::Serialize;

use crate::{
    application::ports::TemplateStore,
    domain::{ArtifactKind, Placeholder, Template, TemplateId},
    error::CicdResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub kind: ArtifactKind,
    pub name: String,
    pub description: String,
    pub builtin: bool,
    pub placeholders: Vec<&'static str>,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id().to_string(),
            kind: t.id().kind(),
            name: t.id().name().to_string(),
            description: t.description().to_string(),
            builtin: t.source().is_builtin(),
            placeholders: t.placeholders().iter().map(Placeholder::token).collect(),
        }
    }
}

/// Service for template operations.
pub struct TemplateService<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> TemplateService<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Get a template by ID.
    pub fn get(&self, id: &TemplateId) -> CicdResult<Template> {
        self.store.get(id)
    }

    /// List all templates, optionally restricted to one artifact kind.
    pub fn list(&self, kind: Option<ArtifactKind>) -> CicdResult<Vec<TemplateInfo>> {
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|t| kind.is_none_or(|k| t.id().kind() == k))
            .map(TemplateInfo::from)
            .collect())
    }
}
