use serde::Serialize;

/// Aggregate view over every entry in the cache namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaCacheStats {
    pub total_size: usize,
    pub item_count: usize,
    /// `hits / (hits + misses)`, `0.0` before the first lookup.
    pub hit_rate: f64,
}
