//! Application context.
//!
//! Owns the observable store, the persistence synchronizer and the location
//! channel for the lifetime of the client. Components receive the context (or
//! the parts they need) explicitly; there is no process-wide instance.

use std::sync::Arc;

use crate::{
    channel::LocationChannel,
    config::ClientConfig,
    domain::KeyValueStore,
    error::ClientError,
    infrastructure::storage::FileKeyValueStore,
    persistence::{PersistenceSynchronizer, SyncHandle, SyncWorker},
    store::ObservableStore,
};

/// Everything the client needs at run time.
pub struct AppContext {
    store: Arc<ObservableStore>,
    synchronizer: Arc<PersistenceSynchronizer>,
    channel: LocationChannel,
}

impl AppContext {
    /// Build the context from command-line configuration, persisting to a
    /// JSON file.
    pub async fn bootstrap(config: &ClientConfig) -> Result<(Self, SyncHandle), ClientError> {
        let storage = FileKeyValueStore::open(&config.store_path).await?;
        Self::with_storage(Arc::new(storage), &config.server_url).await
    }

    /// Build the context on top of any storage backend.
    ///
    /// The store is loaded before this returns, so nobody ever observes the
    /// pre-load defaults. The returned handle controls the sync worker.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Sync` if loading fails; no worker is started.
    pub async fn with_storage(
        storage: Arc<dyn KeyValueStore>,
        server_url: &str,
    ) -> Result<(Self, SyncHandle), ClientError> {
        let store = Arc::new(ObservableStore::new());
        let synchronizer = Arc::new(PersistenceSynchronizer::new(store.clone(), storage));
        synchronizer.load().await?;

        let handle = SyncWorker::spawn(synchronizer.clone());
        let channel = LocationChannel::new(server_url);

        Ok((
            Self {
                store,
                synchronizer,
                channel,
            },
            handle,
        ))
    }

    pub fn store(&self) -> &Arc<ObservableStore> {
        &self.store
    }

    pub fn synchronizer(&self) -> &Arc<PersistenceSynchronizer> {
        &self.synchronizer
    }

    pub fn channel(&self) -> &LocationChannel {
        &self.channel
    }
}
