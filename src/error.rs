//! Error type shared by every operation in the crate.
//!
//! Nothing is recovered internally: each variant propagates to `main`,
//! which reports it and exits non-zero.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration, raised before any filesystem mutation.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required source path does not exist.
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A copy, delete or directory-creation operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    pub fn not_found(path: &Path) -> Self {
        Error::NotFound {
            path: path.to_path_buf(),
        }
    }
}

/// Attaches the offending path to a raw `std::io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
