//! Shared error types for the migration engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for streamfix operations
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Rule configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rewrite patterns that failed to compile
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Rules file parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl MigrationError {
    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a file system error that keeps the underlying io error
    pub fn io_with_path(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Path associated with the error, when one is known
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileSystem { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_display() {
        let err = MigrationError::file_system("Failed to read file", "/tmp/Missing.java");
        assert_eq!(err.to_string(), "File system error: Failed to read file");
        assert_eq!(err.path(), Some(&PathBuf::from("/tmp/Missing.java")));
    }

    #[test]
    fn test_config_error_display() {
        let err = MigrationError::config("arity must be 2 or 3");
        assert_eq!(err.to_string(), "Configuration error: arity must be 2 or 3");
        assert!(err.path().is_none());
    }
}
