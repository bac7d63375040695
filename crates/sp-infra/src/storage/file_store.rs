//! JSON-file backed key-value store.
//! 基于 JSON 文件的键值存储。
//!
//! The whole map lives in memory and is written through to disk on every
//! mutation, temp file first and then renamed over the target.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use sp_core::ports::{KeyValueStorePort, StorageError};
use tracing::{debug, warn};

use super::item_map::ItemMap;

pub struct FileKeyValueStore {
    path: PathBuf,
    inner: Mutex<ItemMap>,
}

impl FileKeyValueStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that does not parse is treated as empty and overwritten on
    /// the next write; an unreadable file is an error.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: Option<usize>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(items) => items,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Store file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(StorageError::Io(format!(
                    "read store failed: {}: {err}",
                    path.display()
                )))
            }
        };
        debug!(path = %path.display(), items = items.len(), "Opened file key-value store");

        Ok(Self {
            path,
            inner: Mutex::new(ItemMap::from_items(items, quota_bytes)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ItemMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &HashMap<String, String>) -> Result<(), StorageError> {
        let content =
            serde_json::to_string(items).map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                StorageError::Io(format!("create store dir failed: {}: {e}", dir.display()))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| {
            StorageError::Io(format!("write temp store failed: {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            StorageError::Io(format!(
                "rename temp store failed: {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        let previous = inner.set(key, value)?;
        if let Err(err) = self.persist(inner.items()) {
            inner.restore(key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        let Some(previous) = inner.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.persist(inner.items()) {
            inner.restore(key, Some(previous));
            return Err(err);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock().keys())
    }
}
