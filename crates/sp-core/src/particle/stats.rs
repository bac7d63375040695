use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolStats {
    pub total_created: u64,
    pub total_reused: u64,
    pub active_particles: usize,
    pub pooled_particles: usize,
    /// `total_reused / (total_created + total_reused)`, `0.0` before the first request.
    pub reuse_rate: f64,
}
