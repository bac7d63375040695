use std::sync::{Mutex, MutexGuard, PoisonError};

use sp_core::ports::{KeyValueStorePort, StorageError};

use super::item_map::ItemMap;

/// Process-local store. Contents are gone when the process exits.
pub struct InMemoryKeyValueStore {
    inner: Mutex<ItemMap>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ItemMap::new(None)),
        }
    }

    /// Store that refuses writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(ItemMap::new(Some(quota_bytes))),
        }
    }

    pub fn used_bytes(&self) -> usize {
        self.lock().used_bytes()
    }

    fn lock(&self) -> MutexGuard<'_, ItemMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorePort for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().set(key, value).map(|_| ())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock().keys())
    }
}
