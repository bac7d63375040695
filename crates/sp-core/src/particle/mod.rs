//! Particle descriptors handed out by the pool.

mod category;
mod descriptor;
mod stats;

pub use category::{ParticleCategory, ParticleError};
pub use descriptor::{
    Bounds, OpaquePayload, ParticleConfig, ParticleDescriptor, ParticleId, Position,
    DEFAULT_COLOR, DEFAULT_SIZE,
};
pub use stats::PoolStats;
