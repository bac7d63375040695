use std::collections::HashMap;

use sp_core::ports::StorageError;

/// String map with byte accounting against an optional quota.
///
/// Usage is `key.len() + value.len()` summed over all items, the same way
/// browsers bill `localStorage`.
#[derive(Debug, Default)]
pub(crate) struct ItemMap {
    items: HashMap<String, String>,
    used_bytes: usize,
    quota_bytes: Option<usize>,
}

impl ItemMap {
    pub(crate) fn new(quota_bytes: Option<usize>) -> Self {
        Self {
            items: HashMap::new(),
            used_bytes: 0,
            quota_bytes,
        }
    }

    pub(crate) fn from_items(items: HashMap<String, String>, quota_bytes: Option<usize>) -> Self {
        let used_bytes = items.iter().map(|(k, v)| k.len() + v.len()).sum();
        Self {
            items,
            used_bytes,
            quota_bytes,
        }
    }

    pub(crate) fn items(&self) -> &HashMap<String, String> {
        &self.items
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    /// Returns the value previously stored under `key`, for rollback.
    pub(crate) fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, StorageError> {
        let replaced = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        let needed = key.len() + value.len();
        let projected = self.used_bytes - replaced + needed;

        if let Some(quota) = self.quota_bytes {
            if projected > quota {
                return Err(StorageError::QuotaExceeded {
                    needed,
                    available: quota.saturating_sub(self.used_bytes - replaced),
                });
            }
        }

        self.used_bytes = projected;
        Ok(self.items.insert(key.to_string(), value.to_string()))
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.items.remove(key);
        if let Some(value) = &removed {
            self.used_bytes -= key.len() + value.len();
        }
        removed
    }

    /// Put back whatever `set`/`remove` displaced.
    pub(crate) fn restore(&mut self, key: &str, previous: Option<String>) {
        self.remove(key);
        if let Some(value) = previous {
            self.used_bytes += key.len() + value.len();
            self.items.insert(key.to_string(), value);
        }
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub(crate) fn used_bytes(&self) -> usize {
        self.used_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_bytes_across_overwrite_and_remove() {
        let mut map = ItemMap::new(None);
        map.set("k", "abc").unwrap();
        assert_eq!(map.used_bytes(), 4);

        map.set("k", "a").unwrap();
        assert_eq!(map.used_bytes(), 2);

        map.remove("k");
        assert_eq!(map.used_bytes(), 0);
    }

    #[test]
    fn overwrite_is_billed_net_of_old_value() {
        let mut map = ItemMap::new(Some(6));
        map.set("k", "abcde").unwrap();
        // 6 bytes used; replacing with an equally long value still fits.
        map.set("k", "vwxyz").unwrap();
        assert!(matches!(
            map.set("j", "x"),
            Err(StorageError::QuotaExceeded { needed: 2, available: 0 })
        ));
    }

    #[test]
    fn restore_reverts_a_set() {
        let mut map = ItemMap::new(None);
        map.set("k", "old").unwrap();
        let previous = map.set("k", "newer").unwrap();
        map.restore("k", previous);
        assert_eq!(map.get("k").as_deref(), Some("old"));
        assert_eq!(map.used_bytes(), 4);
    }
}
