//! I/O trait definitions for the migration driver.
//!
//! The rewrite engine is pure text in, text out. Reading and writing the
//! files it works on goes through [`FileSystem`] so the driver can be tested
//! against an in-memory implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use streamfix::io::traits::FileSystem;
//!
//! fn count_lines<F: FileSystem>(fs: &F, path: &Path) -> Result<usize> {
//!     Ok(fs.read_to_string(path)?.lines().count())
//! }
//! ```

use crate::errors::MigrationError;
use std::path::Path;

/// File system operations trait.
pub trait FileSystem {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::FileSystem` if:
    /// - The file doesn't exist
    /// - Permission is denied
    /// - The file isn't valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, MigrationError>;

    /// Replace a file's contents.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::FileSystem` if:
    /// - Permission is denied
    /// - Parent directory doesn't exist
    /// - Disk is full
    fn write(&self, path: &Path, content: &str) -> Result<(), MigrationError>;

    /// Check if a path is a file.
    fn is_file(&self, path: &Path) -> bool;
}
