//! Production implementation of [`FileSystem`].

use crate::errors::MigrationError;
use crate::io::traits::FileSystem;
use std::fs;
use std::path::Path;

/// Production file system implementation.
///
/// This implementation directly delegates to `std::fs` operations.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    /// Create a new real file system instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, MigrationError> {
        fs::read_to_string(path).map_err(|e| {
            MigrationError::io_with_path(format!("Failed to read {}", path.display()), path, e)
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), MigrationError> {
        fs::write(path, content).map_err(|e| {
            MigrationError::io_with_path(format!("Failed to write {}", path.display()), path, e)
        })
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
