//! Storage error types.
//!
//! Defines errors that can occur during storage operations:
//! - `Io`: the backing file or device failed
//! - `Snapshot`: the stored image exists but does not decode

use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// I/O error (file system, permissions, injected fault)
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored snapshot is corrupt or of an unknown format
    #[error("corrupt snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
