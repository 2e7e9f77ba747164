//! JSON file key/value store.
//!
//! The whole store is one JSON object on disk. Writes are buffered in memory
//! and `save` replaces the file atomically (write to `<path>.tmp`, then
//! rename), so a crash during `save` leaves the previous file intact.
//! Concurrent `save` calls run one at a time, since they share the temp file.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::{KeyValueStore, StorageError};

/// File-backed [`KeyValueStore`].
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
    /// Held across write and rename of the temp file
    save_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open the store at `path`.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first `save`.
    ///
    /// # Errors
    ///
    /// * `StorageError::Io` - the file exists but cannot be read
    /// * `StorageError::Serialization` - the file is not a JSON object
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Store file {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(
            "Opened store {} with {} keys",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            save_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self) -> Result<(), StorageError> {
        let _saving = self.save_lock.lock().await;

        // Serialize under the lock so the file matches one consistent map.
        let bytes = {
            let entries = self.entries.lock().await;
            serde_json::to_vec_pretty(&*entries)?
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        tracing::debug!("Saved store to {}", self.path.display());
        Ok(())
    }
}
