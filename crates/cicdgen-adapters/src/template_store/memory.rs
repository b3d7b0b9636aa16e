//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, info, instrument};

use cicdgen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Template, TemplateId},
    error::CicdResult,
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store.
///
/// Keyed by [`TemplateId`]; inserting an existing ID replaces the template,
/// which is how user overrides shadow the built-ins.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in templates loaded.
    pub fn with_builtin() -> CicdResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load the built-in templates, replacing any with the same ID.
    pub fn load_builtin(&self) -> CicdResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Load user templates from `dir`, replacing built-ins of the same name.
    ///
    /// Returns how many templates were loaded.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_overrides(&self, dir: &Path) -> CicdResult<usize> {
        let templates = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = templates.len();

        for template in templates {
            if self.contains(template.id())? {
                debug!(id = %template.id(), "overriding built-in template");
            }
            self.insert(template)?;
        }

        info!(count, "template overrides loaded");
        Ok(count)
    }

    pub fn contains(&self, id: &TemplateId) -> CicdResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> CicdResult<RwLockReadGuard<'_, BTreeMap<TemplateId, Template>>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> CicdResult<RwLockWriteGuard<'_, BTreeMap<TemplateId, Template>>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> CicdResult<Template> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.clone() }.into())
    }

    fn list(&self) -> CicdResult<Vec<Template>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> CicdResult<()> {
        self.write()?.insert(template.id().clone(), template);
        Ok(())
    }
}
