//! Frame-rate sampling and the merged performance snapshot.

mod entry;
mod frame_rate;
mod performance;

pub use entry::{PerformanceEntry, PerformanceEntryKind, SLOW_OPERATION_MS};
pub use frame_rate::{FrameRateMonitor, INITIAL_FRAME_RATE};
pub use performance::PerformanceMetrics;

/// `numerator / denominator`, or `0.0` when nothing has been counted yet.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
