//! String key-value storage backends.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{load_json_or_default, save_json};

/// Asynchronous string key-value storage.
///
/// Multi-key writes and removals apply as a unit: either every key changes
/// or none does.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Reads one key.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes several keys at once.
    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    /// Removes several keys at once. Missing keys are ignored.
    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StoreError>;
}

// ============================================================================
// Memory Store
// ============================================================================

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.entries.write().await;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Store persisted as one JSON object on disk.
///
/// The whole object is rewritten on every change; the in-memory copy only
/// advances once the write succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file is missing or
    /// unreadable.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: BTreeMap<String, String> = load_json_or_default(&path).await;
        debug!(path = %path.display(), keys = entries.len(), "Opened file store");
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn multi_set(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut map = self.entries.write().await;
        let mut next = map.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), value.clone());
        }
        save_json(&self.path, &next).await?;
        *map = next;
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.entries.write().await;
        if !keys.iter().any(|k| map.contains_key(*k)) {
            return Ok(());
        }
        let mut next = map.clone();
        for key in keys {
            next.remove(*key);
        }
        save_json(&self.path, &next).await?;
        *map = next;
        Ok(())
    }
}
