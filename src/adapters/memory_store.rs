use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ArtifactStore;

/// In-memory artifact store for testing.
///
/// Clones share the same files, so a test can keep a handle for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactStore {
    files: Arc<Mutex<BTreeMap<String, String>>>,
    dirs: Arc<Mutex<BTreeSet<String>>>,
    failing: Arc<Mutex<BTreeSet<String>>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file as if it already existed on disk.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files.lock().unwrap().insert(path.to_string(), content.to_string());
        self
    }

    /// Make every later write to `path` fail with an I/O error.
    pub fn fail_writes_to(self, path: &str) -> Self {
        self.failing.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn file_exists(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read_file(&self, path: &str) -> Result<String, AppError> {
        self.file(path).ok_or_else(|| {
            AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {path}"),
            ))
        })
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Permission denied: {path}"),
            )));
        }
        self.files.lock().unwrap().insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &str) -> Result<(), AppError> {
        self.dirs.lock().unwrap().insert(path.to_string());
        Ok(())
    }
}
