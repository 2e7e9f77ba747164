//! Crate-level error type.

use thiserror::Error;

use crate::{
    channel::ChannelError,
    domain::{StorageError, ValueObjectError},
    persistence::SyncError,
    store::StoreError,
};

/// Any error the client surfaces to its entry points.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),
}
