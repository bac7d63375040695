//! # Coordinator Dependencies / 协调器依赖
//!
//! Parameter grouping for [`PerformanceCoordinator::start`]. Not a builder:
//! no defaults, no hidden logic, every field is required.
//!
//! [`PerformanceCoordinator::start`]: crate::PerformanceCoordinator::start

use std::sync::Arc;

use sp_core::ports::{ClockPort, MemoryProbePort};

use crate::media_cache::MediaCache;
use crate::particle_pool::ParticlePool;

pub struct CoordinatorDeps {
    pub media_cache: Arc<MediaCache>,
    pub particle_pool: ParticlePool,
    pub clock: Arc<dyn ClockPort>,
    pub memory: Arc<dyn MemoryProbePort>,
}
