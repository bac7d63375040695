//! Key-value backed media cache.
//! 基于键值存储的媒体缓存。
//!
//! Every entry lives under `<prefix>base64(url)` in the shared store. Total
//! resident size is kept at or below the configured capacity by evicting
//! the oldest entries first; entries older than the expiry window are
//! dropped when they are next looked at.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use sp_core::config::MediaCacheConfig;
use sp_core::media::{cache_key, CacheEntry, MediaBlob, MediaCacheStats};
use sp_core::metrics::rate;
use sp_core::ports::{ClockPort, KeyValueStorePort, MediaFetcherPort, StorageError};
use tracing::{debug, info, warn};

use crate::errors::MediaCacheError;

/// Index row for an entry found while scanning the namespace.
#[derive(Debug, Clone)]
struct ResidentEntry {
    key: String,
    created_at_ms: i64,
    size: usize,
}

pub struct MediaCache {
    store: Arc<dyn KeyValueStorePort>,
    fetcher: Arc<dyn MediaFetcherPort>,
    clock: Arc<dyn ClockPort>,
    config: MediaCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    // Serializes scan-evict-write so concurrent inserts cannot overshoot capacity.
    write_lock: Mutex<()>,
}

impl MediaCache {
    /// Create the cache and purge anything already expired in the store.
    pub fn new(
        store: Arc<dyn KeyValueStorePort>,
        fetcher: Arc<dyn MediaFetcherPort>,
        clock: Arc<dyn ClockPort>,
        config: MediaCacheConfig,
    ) -> Self {
        let cache = Self {
            store,
            fetcher,
            clock,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        };
        cache.clean_expired_items();
        cache
    }

    pub fn config(&self) -> &MediaCacheConfig {
        &self.config
    }

    /// Encode `blob` and store it for `url`, evicting oldest entries when
    /// the new entry would not fit.
    ///
    /// Caching is best-effort: callers should log a failure and carry on
    /// with the uncached source.
    pub fn cache_media(&self, url: &str, blob: &MediaBlob) -> Result<(), MediaCacheError> {
        self.insert(url, blob).map(|_| ())
    }

    /// Cached payload for `url`, if present and not expired.
    ///
    /// Expired and unreadable entries are removed on the way out. Every call
    /// counts as exactly one hit or one miss.
    pub fn get_cached_media(&self, url: &str) -> Option<String> {
        let key = self.key_for(url);

        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.miss(),
            Err(err) => {
                warn!(url, error = %err, "Failed to retrieve cached media");
                return self.miss();
            }
        };

        let entry = match CacheEntry::decode(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(url, error = %err, "Dropping corrupt cache entry");
                self.remove_quietly(&key);
                return self.miss();
            }
        };

        if entry.is_expired(self.clock.now_ms(), self.config.expiry_ms()) {
            debug!(url, created_at_ms = entry.created_at_ms(), "Cache entry expired");
            self.remove_quietly(&key);
            return self.miss();
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(entry.into_payload())
    }

    /// Usable source for `url`: the cached payload when there is one,
    /// otherwise fetch, cache and return the fresh payload.
    ///
    /// Never fails. If the fetch or the write fails the original URL comes
    /// back, so callers must accept either form.
    pub async fn preload_media(&self, url: &str) -> String {
        if let Some(payload) = self.get_cached_media(url) {
            return payload;
        }

        let blob = match self.fetcher.fetch(url).await {
            Ok(blob) => blob,
            Err(err) => {
                warn!(url, error = %err, "Failed to preload media");
                return url.to_string();
            }
        };

        match self.insert(url, &blob) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(url, error = %err, "Failed to cache media");
                url.to_string()
            }
        }
    }

    pub fn get_stats(&self) -> MediaCacheStats {
        let resident = self.scan_or_empty();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        MediaCacheStats {
            total_size: resident.iter().map(|e| e.size).sum(),
            item_count: resident.len(),
            hit_rate: rate(hits, hits + misses),
        }
    }

    /// Remove every entry in the namespace and reset the hit/miss counters.
    pub fn clear_cache(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut removed = 0usize;
        match self.namespace_keys() {
            Ok(keys) => {
                for key in keys {
                    self.remove_quietly(&key);
                    removed += 1;
                }
            }
            Err(err) => warn!(error = %err, "Failed to list cache keys for clearing"),
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!(removed, "Media cache cleared");
    }

    fn insert(&self, url: &str, blob: &MediaBlob) -> Result<String, MediaCacheError> {
        let entry = CacheEntry::new(blob.to_data_uri(), self.clock.now_ms());
        let capacity = self.config.max_cache_bytes;
        if entry.size_bytes() > capacity {
            return Err(MediaCacheError::EntryTooLarge {
                size: entry.size_bytes(),
                capacity,
            });
        }

        let key = self.key_for(url);
        let raw = entry
            .encode()
            .map_err(|e| MediaCacheError::Encoding(e.to_string()))?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // An existing entry for the same URL is about to be overwritten.
        let mut resident: Vec<ResidentEntry> =
            self.scan()?.into_iter().filter(|e| e.key != key).collect();
        let mut total: usize = resident.iter().map(|e| e.size).sum();

        if total + entry.size_bytes() > capacity {
            resident.sort_by_key(|e| e.created_at_ms);
            for victim in &resident {
                if total + entry.size_bytes() <= capacity {
                    break;
                }
                self.store.remove_item(&victim.key)?;
                total -= victim.size;
                debug!(key = %victim.key, size = victim.size, "Evicted cache entry");
            }
        }

        self.store.set_item(&key, &raw)?;
        debug!(url, size = entry.size_bytes(), total = total + entry.size_bytes(), "Cached media");
        Ok(entry.into_payload())
    }

    /// Runs once at construction; there is no background timer.
    fn clean_expired_items(&self) {
        let now = self.clock.now_ms();
        let expiry = self.config.expiry_ms();
        let resident = self.scan_or_empty();
        let mut removed = 0usize;

        for entry in resident {
            if now.saturating_sub(entry.created_at_ms) > expiry {
                self.remove_quietly(&entry.key);
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed, "Purged expired media cache entries");
        }
    }

    /// Every decodable entry in the namespace. Unreadable ones are removed.
    fn scan(&self) -> Result<Vec<ResidentEntry>, StorageError> {
        let mut resident = Vec::new();
        for key in self.namespace_keys()? {
            let Some(raw) = self.store.get_item(&key)? else {
                continue;
            };
            match CacheEntry::decode(&raw) {
                Ok(entry) => resident.push(ResidentEntry {
                    key,
                    created_at_ms: entry.created_at_ms(),
                    size: entry.size_bytes(),
                }),
                Err(err) => {
                    warn!(key = %key, error = %err, "Dropping corrupt cache entry");
                    self.remove_quietly(&key);
                }
            }
        }
        Ok(resident)
    }

    fn scan_or_empty(&self) -> Vec<ResidentEntry> {
        self.scan().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to scan media cache");
            Vec::new()
        })
    }

    fn namespace_keys(&self) -> Result<Vec<String>, StorageError> {
        let prefix = self.config.key_prefix.as_str();
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect())
    }

    fn key_for(&self, url: &str) -> String {
        cache_key(&self.config.key_prefix, url)
    }

    fn remove_quietly(&self, key: &str) {
        if let Err(err) = self.store.remove_item(key) {
            warn!(key, error = %err, "Failed to remove cache entry");
        }
    }

    fn miss(&self) -> Option<String> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }
}
