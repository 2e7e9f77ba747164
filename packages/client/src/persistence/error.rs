//! Persistence layer error definitions.

use thiserror::Error;

use crate::domain::StorageError;

/// Errors surfaced by `load()` and `save()`.
///
/// Nothing here is retried; the caller decides whether to log or propagate.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A key could not be read while loading
    #[error("failed to read '{key}' from storage: {source}")]
    Read {
        key: &'static str,
        source: StorageError,
    },

    /// A stored value does not have the shape of its field
    #[error("stored value for '{key}' is malformed: {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },

    /// A field could not be encoded for storage
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    /// A key could not be written while saving
    #[error("failed to write '{key}' to storage: {source}")]
    Write {
        key: &'static str,
        source: StorageError,
    },

    /// The durability flush failed
    #[error("failed to flush storage: {source}")]
    Flush { source: StorageError },
}

impl SyncError {
    /// Storage key involved, if the failure is tied to one
    pub fn key(&self) -> Option<&'static str> {
        match self {
            SyncError::Read { key, .. }
            | SyncError::Decode { key, .. }
            | SyncError::Encode { key, .. }
            | SyncError::Write { key, .. } => Some(key),
            SyncError::Flush { .. } => None,
        }
    }
}
