//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use cicdgen_core::{
    application::{ApplicationError, IoFailureKind, ports::Filesystem},
    error::CicdResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can hand one clone to the
/// services and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path) -> cicdgen_core::error::CicdError {
    ApplicationError::io(path, IoFailureKind::NotFound, "No such file or directory").into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> CicdResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn read_json(&self, path: &Path) -> CicdResult<serde_json::Value> {
        let text = self.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::io(path, IoFailureKind::Parse, format!("Invalid JSON: {e}")).into()
        })
    }

    fn read_dir(&self, path: &Path) -> CicdResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }

        let children: BTreeSet<PathBuf> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        Ok(children.into_iter().collect())
    }

    fn create_dir_all(&self, path: &Path) -> CicdResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CicdResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Parent must exist, like std::fs::write
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(parent));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
