//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `sp-infra` and `sp-app` at once. It picks
//! the adapters named by the config and hands them to the services; it
//! makes no decisions of its own.
//! 仅负责组装，不做决策。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sp_app::{CoordinatorDeps, MediaCache, ParticlePool, PerformanceCoordinator};
use sp_core::config::{AppConfig, MediaCacheConfig, StorageBackend};
use sp_core::ports::{KeyValueStorePort, MediaFetcherPort};
use sp_infra::{
    FileKeyValueStore, HttpMediaFetcher, InMemoryKeyValueStore, SysinfoMemoryProbe, SystemClock,
    ThreadRandomSource,
};
use tracing::info;

use super::paths::AppPaths;

/// Key-value store selected by `[storage]`.
pub fn build_store(
    config: &AppConfig,
    paths: &AppPaths,
) -> anyhow::Result<Arc<dyn KeyValueStorePort>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory media store");
            Ok(Arc::new(InMemoryKeyValueStore::new()))
        }
        StorageBackend::File => {
            let path = paths.resolve_store_path(&config.storage);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
            let store = FileKeyValueStore::open(&path, None)
                .with_context(|| format!("Failed to open media store: {}", path.display()))?;
            info!(path = %path.display(), "Using file media store");
            Ok(Arc::new(store))
        }
    }
}

fn build_fetcher(config: &MediaCacheConfig) -> anyhow::Result<Arc<dyn MediaFetcherPort>> {
    let timeout = (config.fetch_timeout_secs > 0)
        .then(|| Duration::from_secs(config.fetch_timeout_secs));
    let mut fetcher = HttpMediaFetcher::new(timeout)?;
    if !config.base_url.is_empty() {
        fetcher = fetcher.with_base_url(&config.base_url)?;
    }
    Ok(Arc::new(fetcher))
}

/// Build every adapter and start the coordinator.
///
/// Must run inside a Tokio runtime; the coordinator spawns its observer.
pub fn build_coordinator(
    config: &AppConfig,
    paths: &AppPaths,
) -> anyhow::Result<Arc<PerformanceCoordinator>> {
    let store = build_store(config, paths)?;
    let fetcher = build_fetcher(&config.media_cache)?;
    let clock = Arc::new(SystemClock);

    let media_cache = Arc::new(MediaCache::new(
        store,
        fetcher,
        clock.clone(),
        config.media_cache.clone(),
    ));
    let deps = CoordinatorDeps {
        media_cache,
        particle_pool: ParticlePool::new(
            config.particle_pool.clone(),
            Box::new(ThreadRandomSource),
        ),
        clock,
        memory: Arc::new(SysinfoMemoryProbe::new()),
    };

    Ok(Arc::new(PerformanceCoordinator::start(
        deps,
        config.performance.clone(),
    )))
}
