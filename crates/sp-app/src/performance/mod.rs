//! Performance coordination: frame/memory sampling and the adaptive
//! control loop over the media cache and particle pool.

mod coordinator;
mod observer;

pub use coordinator::{CoordinatorState, OptimizationReport, PerformanceCoordinator};
pub use observer::PerformanceObserver;
