//! # sp-core
//!
//! Core domain models and ports for the Spardha media cache, particle pool
//! and performance coordinator.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod media;
pub mod metrics;
pub mod particle;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::{AppConfig, MediaCacheConfig, ParticlePoolConfig, PerformanceConfig};
pub use media::{CacheEntry, MediaBlob, MediaCacheStats};
pub use metrics::{FrameRateMonitor, PerformanceEntry, PerformanceEntryKind, PerformanceMetrics};
pub use particle::{
    Bounds, OpaquePayload, ParticleCategory, ParticleConfig, ParticleDescriptor, ParticleError,
    ParticleId, PoolStats, Position,
};
