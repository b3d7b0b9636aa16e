//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use cicdgen_core::{
    application::{ApplicationError, IoFailureKind, ports::Filesystem},
    error::{CicdError, CicdResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> CicdResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_json(&self, path: &Path) -> CicdResult<serde_json::Value> {
        let text = self.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::io(path, IoFailureKind::Parse, format!("Invalid JSON: {e}")).into()
        })
    }

    fn read_dir(&self, path: &Path) -> CicdResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;
        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_io_error(path, e, "list directory"))?;
        paths.sort();
        Ok(paths)
    }

    fn create_dir_all(&self, path: &Path) -> CicdResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CicdResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CicdError {
    let kind = match e.kind() {
        io::ErrorKind::NotFound => IoFailureKind::NotFound,
        io::ErrorKind::PermissionDenied => IoFailureKind::PermissionDenied,
        io::ErrorKind::InvalidData => IoFailureKind::Parse,
        _ => IoFailureKind::Other,
    };
    ApplicationError::io(path, kind, format!("Failed to {operation}: {e}")).into()
}
