//! Media cache domain: the persisted entry shape, key derivation and stats.

mod entry;
mod stats;

pub use entry::{cache_key, CacheEntry, EntryDecodeError, MediaBlob, DEFAULT_MIME};
pub use stats::MediaCacheStats;
