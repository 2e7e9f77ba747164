//! Persistent key/value store abstraction.
//!
//! The persistence layer depends on this trait only; concrete backends live in
//! `infrastructure::storage`.

use async_trait::async_trait;
use serde_json::Value;

use super::error::StorageError;

/// Asynchronous key/value store with buffered writes.
///
/// Writes made with [`set`](KeyValueStore::set) are visible to
/// [`get`](KeyValueStore::get) immediately but only become durable after
/// [`save`](KeyValueStore::save). Each key is last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the current value of `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Buffer a write of `value` under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Commit every buffered write.
    async fn save(&self) -> Result<(), StorageError>;
}
