//! Spardha performance services
//!
//! Media cache, particle pool and the coordinator that ties them to frame
//! rate and memory observations, plus the binding that republishes the
//! coordinator's metrics to the presentation layer.

pub mod binding;
pub mod deps;
pub mod errors;
pub mod media_cache;
pub mod particle_pool;
pub mod performance;

#[cfg(test)]
pub(crate) mod testing;

pub use binding::{BindingOptions, MetricsBinding};
pub use deps::CoordinatorDeps;
pub use errors::MediaCacheError;
pub use media_cache::MediaCache;
pub use particle_pool::{ParticlePool, ReturnOutcome};
pub use performance::{
    CoordinatorState, OptimizationReport, PerformanceCoordinator, PerformanceObserver,
};
