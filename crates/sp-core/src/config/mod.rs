//! # Configuration DTOs / 配置数据结构
//!
//! Plain data mapped from the TOML config file. Every key is optional; a
//! missing key takes the value from the `Default` impl below, which holds
//! the v1 constants (50 MiB cache, 7 day expiry, 1000 pooled particles,
//! 500 particles per section).
//!
//! No validation happens here. A zero capacity is a fact the services
//! have to live with, not an error.

use std::path::PathBuf;

use serde::Deserialize;

use crate::particle::ParticleCategory;

pub const DEFAULT_CACHE_PREFIX: &str = "spardha_media_";
pub const DEFAULT_MAX_CACHE_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_CACHE_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_MAX_POOL_SIZE: usize = 1000;

/// Root configuration object.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub media_cache: MediaCacheConfig,
    pub particle_pool: ParticlePoolConfig,
    pub performance: PerformanceConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaCacheConfig {
    /// Namespace prefix for every key the cache writes.
    pub key_prefix: String,
    pub max_cache_bytes: usize,
    pub expiry_secs: u64,
    /// `0` disables the HTTP timeout.
    pub fetch_timeout_secs: u64,
    /// Base for site-relative media URLs. Empty means absolute URLs only.
    pub base_url: String,
}

impl MediaCacheConfig {
    pub fn expiry_ms(&self) -> i64 {
        i64::try_from(self.expiry_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

impl Default for MediaCacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            max_cache_bytes: DEFAULT_MAX_CACHE_BYTES,
            expiry_secs: DEFAULT_CACHE_EXPIRY_SECS,
            fetch_timeout_secs: 0,
            base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticlePoolConfig {
    /// Total pooled descriptors, split evenly across the categories.
    pub max_pool_size: usize,
}

impl ParticlePoolConfig {
    pub fn per_category_cap(&self) -> usize {
        self.max_pool_size / ParticleCategory::ALL.len()
    }

    /// Free-list length `optimize_pools` trims down to.
    pub fn idle_target(&self) -> usize {
        self.per_category_cap() / 2
    }
}

impl Default for ParticlePoolConfig {
    fn default() -> Self {
        Self {
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    pub enable_media_cache: bool,
    pub enable_particle_pooling: bool,
    /// Ceiling applied to every `create_optimized_particles` call.
    pub max_particles_per_section: usize,
    /// Frame tick period for hosts that drive frames from a timer.
    pub particle_update_interval_ms: u64,
    /// Period of the metrics refresh and optimization pass.
    pub metrics_interval_secs: u64,
    pub low_frame_rate_threshold: u32,
    /// Floor for the adaptive particle ceiling.
    pub min_particles_per_section: usize,
    pub memory_pressure_bytes: u64,
    pub media_preload_list: Vec<String>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            enable_media_cache: true,
            enable_particle_pooling: true,
            max_particles_per_section: 500,
            particle_update_interval_ms: 16, // 60fps
            metrics_interval_secs: 5,
            low_frame_rate_threshold: 30,
            min_particles_per_section: 100,
            memory_pressure_bytes: 100 * 1024 * 1024,
            media_preload_list: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Empty means "use the platform data directory".
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_v1_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.media_cache.key_prefix, "spardha_media_");
        assert_eq!(config.media_cache.max_cache_bytes, 52_428_800);
        assert_eq!(config.media_cache.expiry_ms(), 604_800_000);
        assert_eq!(config.particle_pool.per_category_cap(), 200);
        assert_eq!(config.particle_pool.idle_target(), 100);
        assert_eq!(config.performance.max_particles_per_section, 500);
        assert_eq!(config.performance.metrics_interval_secs, 5);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.path.as_os_str().is_empty());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [performance]
            max_particles_per_section = 250
            media_preload_list = ["/img/hero.webp"]

            [storage]
            backend = "memory"
        "#,
        )
        .unwrap();

        assert_eq!(config.performance.max_particles_per_section, 250);
        assert_eq!(config.performance.media_preload_list, vec!["/img/hero.webp"]);
        assert!(config.performance.enable_media_cache);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.media_cache, MediaCacheConfig::default());
    }

    #[test]
    fn zero_capacity_is_accepted_as_is() {
        let config = AppConfig::from_toml_str(
            r#"
            [media_cache]
            max_cache_bytes = 0
        "#,
        )
        .unwrap();

        assert_eq!(config.media_cache.max_cache_bytes, 0);
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        assert!(AppConfig::from_toml_str("[storage]\nbackend = \"indexeddb\"").is_err());
    }
}
