//! Output location for generated artifacts.

use crate::domain::AppError;

/// Port for reading and writing files relative to the output root.
///
/// All `path` arguments are relative to the root the store was created for.
pub trait ArtifactStore {
    /// Check whether a file exists.
    fn file_exists(&self, path: &str) -> bool;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &str) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, creating parent directories as needed.
    fn write_file(&self, path: &str, content: &str) -> Result<(), AppError>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &str) -> Result<(), AppError>;
}
