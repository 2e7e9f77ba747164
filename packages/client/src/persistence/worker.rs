//! Background task that turns store changes into `save()` calls.
//!
//! Changes are consumed from a single queue and each `save()` finishes before
//! the next change is taken, so saves triggered by the worker never overlap.
//! A failed save is logged and not retried; the next change saves again.

use std::sync::Arc;

use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};

use crate::store::StoreChange;

use super::synchronizer::PersistenceSynchronizer;

/// Spawns the sync task.
pub struct SyncWorker;

impl SyncWorker {
    /// Subscribe to the synchronizer's store and start saving on every change.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(synchronizer: Arc<PersistenceSynchronizer>) -> SyncHandle {
        let mut changes = synchronizer.store().subscribe();
        let (processed_tx, processed_rx) = watch::channel(0u64);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => {
                        // Drain what was queued before the shutdown request.
                        while let Ok(change) = changes.try_recv() {
                            handle_change(&synchronizer, &change, &processed_tx).await;
                        }
                        break;
                    }
                    change = changes.recv() => match change {
                        Some(change) => handle_change(&synchronizer, &change, &processed_tx).await,
                        None => break,
                    },
                }
            }
            tracing::debug!("Sync worker stopped");
        });

        SyncHandle {
            processed: processed_rx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

async fn handle_change(
    synchronizer: &PersistenceSynchronizer,
    change: &StoreChange,
    processed: &watch::Sender<u64>,
) {
    if change.requires_save() {
        match synchronizer.save().await {
            Ok(()) => tracing::debug!("Persisted revision {}", change.revision),
            Err(e) => tracing::error!("Failed to persist revision {}: {}", change.revision, e),
        }
    }
    processed.send_replace(change.revision);
}

/// Handle to a running sync worker.
///
/// Dropping the handle stops the worker the same way [`shutdown`](SyncHandle::shutdown)
/// does, without waiting for it.
pub struct SyncHandle {
    processed: watch::Receiver<u64>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Revision of the last change the worker has handled
    pub fn processed_revision(&self) -> u64 {
        *self.processed.borrow()
    }

    /// Wait until the worker has handled `revision` (or a later one).
    ///
    /// Returns `false` if the worker stopped first.
    pub async fn wait_for(&self, revision: u64) -> bool {
        let mut processed = self.processed.clone();
        processed.wait_for(|r| *r >= revision).await.is_ok()
    }

    /// Stop the worker after it has handled every change already queued.
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("Sync worker ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockKeyValueStore, StorageError, Username, View},
        infrastructure::storage::InMemoryKeyValueStore,
        store::ObservableStore,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spawn_with(
        storage: Arc<dyn crate::domain::KeyValueStore>,
    ) -> (Arc<ObservableStore>, SyncHandle) {
        let store = Arc::new(ObservableStore::new());
        let synchronizer = Arc::new(PersistenceSynchronizer::new(store.clone(), storage));
        (store, SyncWorker::spawn(synchronizer))
    }

    #[tokio::test]
    async fn test_mutation_triggers_save() {
        // テスト項目: ストアの変更で自動的に save が実行される
        // given (前提条件):
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let (store, handle) = spawn_with(storage.clone());

        // when (操作):
        let change = store.set_admin(true).await.unwrap();
        assert!(handle.wait_for(change.revision).await);

        // then (期待する結果):
        assert_eq!(storage.committed().await["admin"], json!(true));
        assert_eq!(handle.processed_revision(), 1);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_burst_of_mutations_converges_to_last_state() {
        // テスト項目: 連続した変更の後、永続化内容は最後の状態に収束する
        // given (前提条件):
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let (store, handle) = spawn_with(storage.clone());

        // when (操作): M1 (username) と M2 (admin) を連続で発行
        store
            .set_username(Some(Username::new("m1".to_string()).unwrap()))
            .await;
        store.set_admin(true).await;
        handle.wait_for(store.revision().await).await;

        // then (期待する結果):
        let committed = storage.committed().await;
        assert_eq!(committed["username"], json!("m1"));
        assert_eq!(committed["admin"], json!(true));
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_navigation_only_change_is_not_saved() {
        // テスト項目: 画面遷移のみの変更では save されない
        // given (前提条件):
        let mut storage = MockKeyValueStore::new();
        storage.expect_set().times(0);
        storage.expect_save().times(0);
        let (store, handle) = spawn_with(Arc::new(storage));

        // when (操作):
        let change = store.navigate(View::Teams).await.unwrap();

        // then (期待する結果): 処理済みにはなるが、ストレージには触れない
        assert!(handle.wait_for(change.revision).await);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_save_is_not_retried_and_worker_continues() {
        // テスト項目: save 失敗はリトライされず、次の変更で再度 save される
        // given (前提条件):
        let flushes = Arc::new(AtomicUsize::new(0));
        let mut storage = MockKeyValueStore::new();
        storage.expect_set().returning(|_, _| Ok(()));
        let counter = flushes.clone();
        storage.expect_save().returning(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            if attempt == 0 {
                Err(StorageError::Backend("flush failed".to_string()))
            } else {
                Ok(())
            }
        });
        let (store, handle) = spawn_with(Arc::new(storage));

        // when (操作):
        let first = store.set_admin(true).await.unwrap();
        handle.wait_for(first.revision).await;
        let flushes_after_failure = flushes.load(Ordering::SeqCst);
        let second = store.set_admin(false).await.unwrap();
        handle.wait_for(second.revision).await;

        // then (期待する結果):
        assert_eq!(flushes_after_failure, 1);
        assert_eq!(flushes.load(Ordering::SeqCst), 2);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_changes() {
        // テスト項目: shutdown 前にキューに入っていた変更は保存される
        // given (前提条件):
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let (store, handle) = spawn_with(storage.clone());
        store.set_admin(true).await;
        store
            .set_username(Some(Username::new("last".to_string()).unwrap()))
            .await;

        // when (操作):
        handle.shutdown().await;

        // then (期待する結果):
        let committed = storage.committed().await;
        assert_eq!(committed["admin"], json!(true));
        assert_eq!(committed["username"], json!("last"));
    }

    #[tokio::test]
    async fn test_wait_for_zero_returns_immediately() {
        // テスト項目: revision 0 は待たずに完了する
        // given (前提条件):
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let (_store, handle) = spawn_with(storage);

        // then (期待する結果):
        assert!(handle.wait_for(0).await);
        handle.shutdown().await;
    }
}
