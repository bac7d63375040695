use std::fmt;

use serde::Serialize;

use super::frame_rate::INITIAL_FRAME_RATE;
use crate::media::MediaCacheStats;
use crate::particle::PoolStats;

const MIB: f64 = 1024.0 * 1024.0;

/// Snapshot merging cache stats, pool stats, frame rate and memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub media_cache: MediaCacheStats,
    pub particle_pool: PoolStats,
    pub frame_rate: u32,
    pub memory_usage: u64,
}

impl PerformanceMetrics {
    pub fn cache_hit_rate(&self) -> f64 {
        self.media_cache.hit_rate
    }

    pub fn pool_reuse_rate(&self) -> f64 {
        self.particle_pool.reuse_rate
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            media_cache: MediaCacheStats::default(),
            particle_pool: PoolStats::default(),
            frame_rate: INITIAL_FRAME_RATE,
            memory_usage: 0,
        }
    }
}

/// Overlay text, one metric per line.
impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FPS: {}", self.frame_rate)?;
        writeln!(f, "Cache Hit Rate: {:.1}%", self.cache_hit_rate() * 100.0)?;
        writeln!(f, "Active Particles: {}", self.particle_pool.active_particles)?;
        writeln!(f, "Pool Reuse Rate: {:.1}%", self.pool_reuse_rate() * 100.0)?;
        write!(f, "Memory: {:.1}MB", self.memory_usage as f64 / MIB)
    }
}
