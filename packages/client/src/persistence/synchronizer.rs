//! Field-by-field mirror between the observable store and persistent storage.
//!
//! `load` reads every tracked key into a staging copy and applies it only when
//! every key was read and decoded; a failure leaves the store as it was.
//!
//! `save` writes each tracked key with the field's value at the moment of
//! that write, then flushes once. There is no transaction around the keys:
//! two overlapping `save` calls can interleave their writes, and the storage
//! keeps the last write per key. The result may not match any single
//! in-memory snapshot, but no key ever holds a value that was not the
//! field's value at some point.

use std::sync::Arc;

use crate::{
    domain::{KeyValueStore, TrackedField},
    store::ObservableStore,
};

use super::{codec, error::SyncError};

/// Keeps an [`ObservableStore`] and a [`KeyValueStore`] converging.
pub struct PersistenceSynchronizer {
    store: Arc<ObservableStore>,
    storage: Arc<dyn KeyValueStore>,
}

impl PersistenceSynchronizer {
    /// Create a new synchronizer
    pub fn new(store: Arc<ObservableStore>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { store, storage }
    }

    /// The store being mirrored
    pub fn store(&self) -> &Arc<ObservableStore> {
        &self.store
    }

    /// Populate the store from storage.
    ///
    /// Absent or `null` keys yield the field default. Does not publish a
    /// store change.
    ///
    /// # Errors
    ///
    /// * `SyncError::Read` - a key could not be read
    /// * `SyncError::Decode` - a stored value has the wrong shape
    ///
    /// On error the store keeps its pre-load state.
    pub async fn load(&self) -> Result<(), SyncError> {
        let mut staged = self.store.snapshot().await;

        for field in TrackedField::ALL {
            let key = field.key();
            let value = self
                .storage
                .get(key)
                .await
                .map_err(|source| SyncError::Read { key, source })?;
            codec::decode(field, value, &mut staged)
                .map_err(|source| SyncError::Decode { key, source })?;
        }

        self.store.hydrate(staged).await;
        tracing::info!("Loaded application state from storage");
        Ok(())
    }

    /// Write every tracked field to storage, then flush.
    ///
    /// Calling this twice with no mutation in between leaves storage unchanged.
    ///
    /// # Errors
    ///
    /// * `SyncError::Encode` - a field could not be encoded
    /// * `SyncError::Write` - a key write failed; later keys and the flush are skipped
    /// * `SyncError::Flush` - the flush failed
    ///
    /// Keys written before a failure are not rolled back.
    pub async fn save(&self) -> Result<(), SyncError> {
        for field in TrackedField::ALL {
            let key = field.key();
            let value = self
                .store
                .read(|state| codec::encode(field, state))
                .await
                .map_err(|source| SyncError::Encode { key, source })?;
            self.storage
                .set(key, value)
                .await
                .map_err(|source| SyncError::Write { key, source })?;
        }

        self.storage
            .save()
            .await
            .map_err(|source| SyncError::Flush { source })?;
        tracing::debug!("Saved application state to storage");
        Ok(())
    }
}
