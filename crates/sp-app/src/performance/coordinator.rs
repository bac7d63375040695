use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use sp_core::config::PerformanceConfig;
use sp_core::metrics::{FrameRateMonitor, PerformanceEntry, PerformanceMetrics};
use sp_core::particle::{Bounds, ParticleCategory, ParticleDescriptor};
use sp_core::ports::{ClockPort, MemoryProbePort};
use tracing::{debug, info, warn};

use super::observer::PerformanceObserver;
use crate::deps::CoordinatorDeps;
use crate::media_cache::MediaCache;
use crate::particle_pool::{ParticlePool, ReturnOutcome};

/// Lifecycle of a [`PerformanceCoordinator`].
///
/// Construction is the only way in, so there is no uninitialized state to
/// observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Monitoring,
    Stopped,
}

/// What an [`PerformanceCoordinator::optimize_performance`] pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationReport {
    /// New per-section ceiling when the frame rate was below threshold.
    pub reduced_particles: Option<usize>,
    /// Media cache was flushed because memory crossed the pressure line.
    pub cleared_cache: bool,
}

/// Single access point over the media cache and particle pool.
///
/// Samples frame rate and memory and adapts the particle ceiling and the
/// cache contents to what it observes. One instance per application,
/// constructed by the composition root and shared by reference.
pub struct PerformanceCoordinator {
    media_cache: Arc<MediaCache>,
    particle_pool: Mutex<ParticlePool>,
    clock: Arc<dyn ClockPort>,
    memory: Arc<dyn MemoryProbePort>,
    config: PerformanceConfig,
    max_particles: AtomicUsize,
    frames: Mutex<FrameRateMonitor>,
    observer: Mutex<PerformanceObserver>,
    stopped: AtomicBool,
}

impl PerformanceCoordinator {
    /// Build the coordinator and start monitoring.
    ///
    /// Spawns the performance observer, so this must run inside a Tokio
    /// runtime.
    pub fn start(deps: CoordinatorDeps, config: PerformanceConfig) -> Self {
        let CoordinatorDeps {
            media_cache,
            particle_pool,
            clock,
            memory,
        } = deps;

        let frames = FrameRateMonitor::new(clock.now_ms());
        info!(
            media_cache = config.enable_media_cache,
            particle_pooling = config.enable_particle_pooling,
            max_particles_per_section = config.max_particles_per_section,
            "Performance monitoring started"
        );

        Self {
            media_cache,
            particle_pool: Mutex::new(particle_pool),
            clock,
            memory,
            max_particles: AtomicUsize::new(config.max_particles_per_section),
            config,
            frames: Mutex::new(frames),
            observer: Mutex::new(PerformanceObserver::spawn()),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        if self.stopped.load(Ordering::Acquire) {
            CoordinatorState::Stopped
        } else {
            CoordinatorState::Monitoring
        }
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Preload every URL concurrently. Individual failures are logged by
    /// the cache and never fail the batch.
    pub async fn preload_assets(&self, urls: &[String]) {
        if !self.config.enable_media_cache || urls.is_empty() {
            return;
        }

        let sources = join_all(urls.iter().map(|url| self.media_cache.preload_media(url))).await;
        let cached = sources
            .iter()
            .zip(urls)
            .filter(|(source, url)| source != url)
            .count();
        info!(requested = urls.len(), cached, "Preloaded media assets");
    }

    /// Cached payload for `url`, or `url` itself. Never fetches.
    pub fn get_optimized_media_url(&self, url: &str) -> String {
        if !self.config.enable_media_cache {
            return url.to_string();
        }
        self.media_cache
            .get_cached_media(url)
            .unwrap_or_else(|| url.to_string())
    }

    /// Batch of `kind` particles, clamped to the current per-section ceiling.
    ///
    /// Unknown kinds and kinds without a batch constructor give an empty
    /// list. With pooling disabled the batch is built outside the pool.
    pub fn create_optimized_particles(
        &self,
        kind: &str,
        count: usize,
        bounds: Bounds,
    ) -> Vec<ParticleDescriptor> {
        let category = match kind.parse::<ParticleCategory>() {
            Ok(category) => category,
            Err(err) => {
                warn!(kind, error = %err, "Ignoring particle request");
                return Vec::new();
            }
        };

        let count = count.min(self.max_particles_per_section());
        let mut pool = self.pool();
        if self.config.enable_particle_pooling {
            pool.create_batch(category, count, bounds)
        } else {
            pool.create_unpooled_batch(category, count, bounds)
        }
    }

    /// Hand descriptors back to the pool. Returns how many were pooled.
    pub fn return_particles(&self, descriptors: Vec<ParticleDescriptor>) -> usize {
        let mut pool = self.pool();
        descriptors
            .into_iter()
            .map(|descriptor| pool.return_particle(descriptor))
            .filter(|outcome| *outcome == ReturnOutcome::Pooled)
            .count()
    }

    pub fn get_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            media_cache: self.media_cache.get_stats(),
            particle_pool: self.pool().get_stats(),
            frame_rate: self.frames().frame_rate(),
            memory_usage: self.memory.used_bytes(),
        }
    }

    /// One pass of the reactive control loop.
    ///
    /// Low frame rate shrinks the particle ceiling by 20% down to the
    /// configured floor; memory pressure flushes the media cache. The pool's
    /// free lists are trimmed on every pass.
    pub fn optimize_performance(&self) -> OptimizationReport {
        let metrics = self.get_metrics();
        let mut report = OptimizationReport::default();

        if metrics.frame_rate < self.config.low_frame_rate_threshold {
            let current = self.max_particles_per_section();
            let reduced = ((current as f64 * 0.8) as usize)
                .max(self.config.min_particles_per_section)
                .min(current);
            self.max_particles.store(reduced, Ordering::Release);
            report.reduced_particles = Some(reduced);
            warn!(
                frame_rate = metrics.frame_rate,
                from = current,
                to = reduced,
                "Performance degraded, reducing particle count"
            );
        }

        if metrics.memory_usage > self.config.memory_pressure_bytes {
            self.media_cache.clear_cache();
            report.cleared_cache = true;
            warn!(
                memory_usage = metrics.memory_usage,
                threshold = self.config.memory_pressure_bytes,
                "High memory usage detected, clearing caches"
            );
        }

        let dropped = self.pool().optimize_pools();
        debug!(dropped, "Optimized particle pools");
        report
    }

    /// Count one rendered frame. No-op after [`cleanup`](Self::cleanup).
    pub fn record_frame(&self) {
        if self.stopped.load(Ordering::Acquire) {
            return;
        }
        let now = self.clock.now_ms();
        self.frames().record_frame(now);
    }

    /// Forward a timing entry to the observer. `false` once stopped.
    pub fn record_entry(&self, entry: PerformanceEntry) -> bool {
        if self.stopped.load(Ordering::Acquire) {
            return false;
        }
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observe(entry)
    }

    pub fn slow_operations(&self) -> u64 {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .slow_operations()
    }

    pub fn max_particles_per_section(&self) -> usize {
        self.max_particles.load(Ordering::Acquire)
    }

    pub fn media_cache(&self) -> &Arc<MediaCache> {
        &self.media_cache
    }

    /// Run `f` with exclusive access to the pool.
    pub fn with_particle_pool<R>(&self, f: impl FnOnce(&mut ParticlePool) -> R) -> R {
        f(&mut self.pool())
    }

    /// Stop frame sampling and detach the observer. Idempotent.
    pub fn cleanup(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .disconnect();
        info!("Performance monitoring stopped");
    }

    fn pool(&self) -> MutexGuard<'_, ParticlePool> {
        self.particle_pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn frames(&self) -> MutexGuard<'_, FrameRateMonitor> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
