//! Persistence error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the storage medium.
///
/// Corrupt documents are not an error: the store reports them as empty.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File system operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize compositions: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key cannot be used as a storage slot name.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}
