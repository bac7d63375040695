//! Cache entry stored in the key-value store.
//! 存储在键值存储中的缓存条目。
//!
//! Storage layout: key = `<prefix>` + base64(url), value = JSON
//! `{"data": "<data uri>", "timestamp": <epoch ms>, "size": <len>}`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Derive the storage key for a media URL.
/// 根据媒体 URL 生成存储键。
pub fn cache_key(prefix: &str, url: &str) -> String {
    format!("{prefix}{}", STANDARD.encode(url.as_bytes()))
}

/// Raw media as returned by a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl MediaBlob {
    pub fn new(bytes: Vec<u8>, mime: Option<String>) -> Self {
        Self { bytes, mime }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Text-safe encoding of the blob: `data:<mime>;base64,<bytes>`.
    pub fn to_data_uri(&self) -> String {
        let mime = self
            .mime
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MIME);
        format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Error)]
pub enum EntryDecodeError {
    #[error("cache entry is not valid json: {0}")]
    Json(String),

    #[error("cache entry declares {declared} bytes but holds {actual}")]
    SizeMismatch { declared: usize, actual: usize },
}

/// Immutable cached media record.
///
/// `size` always equals `data.len()`; [`CacheEntry::decode`] rejects stored
/// values where it does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    data: String,
    timestamp: i64,
    size: usize,
}

impl CacheEntry {
    pub fn new(payload: String, created_at_ms: i64) -> Self {
        let size = payload.len();
        Self {
            data: payload,
            timestamp: created_at_ms,
            size,
        }
    }

    pub fn payload(&self) -> &str {
        &self.data
    }

    pub fn into_payload(self) -> String {
        self.data
    }

    pub fn created_at_ms(&self) -> i64 {
        self.timestamp
    }

    pub fn size_bytes(&self) -> usize {
        self.size
    }

    /// Strictly older than `expiry_ms` at `now_ms`.
    pub fn is_expired(&self, now_ms: i64, expiry_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) > expiry_ms
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Result<Self, EntryDecodeError> {
        let entry: CacheEntry =
            serde_json::from_str(raw).map_err(|e| EntryDecodeError::Json(e.to_string()))?;
        if entry.size != entry.data.len() {
            return Err(EntryDecodeError::SizeMismatch {
                declared: entry.size,
                actual: entry.data.len(),
            });
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_prefix_plus_base64_url() {
        let key = cache_key("spardha_media_", "a.png");
        assert_eq!(key, "spardha_media_YS5wbmc=");
    }

    #[test]
    fn cache_key_differs_per_url() {
        assert_ne!(cache_key("p_", "/img/a.png"), cache_key("p_", "/img/b.png"));
    }

    #[test]
    fn data_uri_uses_blob_mime() {
        let blob = MediaBlob::new(vec![0x89, 0x50], Some("image/png".to_string()));
        assert_eq!(blob.to_data_uri(), "data:image/png;base64,iVA=");
    }

    #[test]
    fn data_uri_falls_back_to_octet_stream() {
        let blob = MediaBlob::new(b"hi".to_vec(), None);
        assert_eq!(blob.to_data_uri(), "data:application/octet-stream;base64,aGk=");

        let blank = MediaBlob::new(b"hi".to_vec(), Some("  ".to_string()));
        assert!(blank.to_data_uri().starts_with("data:application/octet-stream;"));
    }

    #[test]
    fn entry_size_tracks_payload_length() {
        let entry = CacheEntry::new("data:x;base64,AAAA".to_string(), 10);
        assert_eq!(entry.size_bytes(), 18);
        assert_eq!(entry.created_at_ms(), 10);
    }

    #[test]
    fn entry_json_uses_storage_field_names() {
        let entry = CacheEntry::new("abc".to_string(), 42);
        let json: serde_json::Value = serde_json::from_str(&entry.encode().unwrap()).unwrap();
        assert_eq!(json["data"], "abc");
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["size"], 3);
    }

    #[test]
    fn decode_rejects_garbage_and_size_mismatch() {
        assert!(matches!(
            CacheEntry::decode("{not json"),
            Err(EntryDecodeError::Json(_))
        ));
        assert!(matches!(
            CacheEntry::decode(r#"{"data":"abc","timestamp":1,"size":99}"#),
            Err(EntryDecodeError::SizeMismatch {
                declared: 99,
                actual: 3
            })
        ));
    }

    #[test]
    fn expiry_is_strictly_greater_than_window() {
        let entry = CacheEntry::new("x".to_string(), 1_000);
        assert!(!entry.is_expired(1_500, 500));
        assert!(entry.is_expired(1_501, 500));
    }
}
