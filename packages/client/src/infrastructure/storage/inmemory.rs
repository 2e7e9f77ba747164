//! InMemory key/value store.
//!
//! Writes land in a pending buffer that `get` already sees; `save` moves the
//! buffer into the committed map in one step. Every operation yields to the
//! scheduler once, so concurrent callers interleave at key granularity.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::{KeyValueStore, StorageError};

#[derive(Default)]
struct Maps {
    pending: HashMap<String, Value>,
    committed: HashMap<String, Value>,
}

/// Volatile [`KeyValueStore`] with buffered writes.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    maps: Mutex<Maps>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose committed map already holds `entries`
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let committed = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            maps: Mutex::new(Maps {
                pending: HashMap::new(),
                committed,
            }),
        }
    }

    /// Copy of the durable (saved) contents
    pub async fn committed(&self) -> HashMap<String, Value> {
        self.maps.lock().await.committed.clone()
    }

    /// Number of writes buffered since the last save
    pub async fn pending_len(&self) -> usize {
        self.maps.lock().await.pending.len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        tokio::task::yield_now().await;
        let maps = self.maps.lock().await;
        Ok(maps
            .pending
            .get(key)
            .or_else(|| maps.committed.get(key))
            .cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        self.maps
            .lock()
            .await
            .pending
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        let mut maps = self.maps.lock().await;
        let pending = std::mem::take(&mut maps.pending);
        maps.committed.extend(pending);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key() {
        // テスト項目: 存在しないキーは None
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();

        // when (操作):
        let result = store.get("username").await;

        // then (期待する結果):
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_is_visible_before_save_but_not_committed() {
        // テスト項目: set した値は save 前でも get で見えるが、コミットはされていない
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();

        // when (操作):
        store.set("admin", json!(true)).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.get("admin").await.unwrap(), Some(json!(true)));
        assert!(store.committed().await.is_empty());
        assert_eq!(store.pending_len().await, 1);
    }

    #[tokio::test]
    async fn test_save_commits_pending_writes() {
        // テスト項目: save で保留中の書き込みがコミットされる
        // given (前提条件):
        let store = InMemoryKeyValueStore::with_entries([("token", json!("old"))]);
        store.set("token", json!("new")).await.unwrap();
        store.set("admin", json!(false)).await.unwrap();

        // when (操作):
        store.save().await.unwrap();

        // then (期待する結果):
        let committed = store.committed().await;
        assert_eq!(committed.get("token"), Some(&json!("new")));
        assert_eq!(committed.get("admin"), Some(&json!(false)));
        assert_eq!(store.pending_len().await, 0);
    }

    #[tokio::test]
    async fn test_last_write_wins_per_key() {
        // テスト項目: 同じキーへの書き込みは最後のものが残る
        // given (前提条件):
        let store = InMemoryKeyValueStore::new();

        // when (操作):
        store.set("username", json!("alice")).await.unwrap();
        store.set("username", json!("bob")).await.unwrap();
        store.save().await.unwrap();

        // then (期待する結果):
        assert_eq!(store.committed().await.get("username"), Some(&json!("bob")));
    }
}
