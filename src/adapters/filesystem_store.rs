use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ArtifactStore;

/// Filesystem-based artifact store rooted at one directory.
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    /// Create a store for the given root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path escapes output directory: {path}"),
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl ArtifactStore for FilesystemArtifactStore {
    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn read_file(&self, path: &str) -> Result<String, AppError> {
        Ok(fs::read_to_string(self.resolve(path)?)?)
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &str) -> Result<(), AppError> {
        fs::create_dir_all(self.resolve(path)?)?;
        Ok(())
    }
}
