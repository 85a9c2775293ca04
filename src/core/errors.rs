//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for repodoc operations.
///
/// Per-file parse failures are not errors at this level; they are recorded
/// as skipped files and the batch continues. This type covers the failures
/// that belong to the caller: unreadable inputs, bad configuration and
/// malformed manifests.
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Package manifest errors
    #[error("Manifest error in {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Directory walking errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a file system error wrapping an I/O failure
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            message: source.to_string(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
