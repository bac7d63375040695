//! # Metrics binding / 指标绑定
//!
//! Presentation-facing wrapper around a shared [`PerformanceCoordinator`].
//!
//! Spawns the periodic tasks the presentation layer would otherwise own:
//! a metrics refresh that publishes a fresh [`PerformanceMetrics`] snapshot
//! on a `watch` channel and then runs one optimization pass, an optional
//! frame ticker for hosts without their own render loop, and a one-shot
//! preload of the configured media list.

use std::sync::Arc;
use std::time::Duration;

use sp_core::config::PerformanceConfig;
use sp_core::metrics::PerformanceMetrics;
use sp_core::particle::{Bounds, ParticleDescriptor};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::performance::PerformanceCoordinator;

#[derive(Debug, Clone, PartialEq)]
pub struct BindingOptions {
    pub metrics_interval: Duration,
    /// `None` when the host calls `record_frame` itself.
    pub frame_interval: Option<Duration>,
    pub preload: Vec<String>,
}

impl BindingOptions {
    /// Metrics period and preload list from `config`, no frame ticker.
    pub fn from_config(config: &PerformanceConfig) -> Self {
        Self {
            metrics_interval: Duration::from_secs(config.metrics_interval_secs.max(1)),
            frame_interval: None,
            preload: config.media_preload_list.clone(),
        }
    }

    pub fn with_frame_ticker(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}

pub struct MetricsBinding {
    coordinator: Arc<PerformanceCoordinator>,
    metrics_rx: watch::Receiver<PerformanceMetrics>,
    tasks: Vec<AbortHandle>,
}

impl MetricsBinding {
    /// Start the binding's tasks. Must be called inside a Tokio runtime.
    pub fn spawn(coordinator: Arc<PerformanceCoordinator>, options: BindingOptions) -> Self {
        let (metrics_tx, metrics_rx) = watch::channel(PerformanceMetrics::default());
        let mut tasks = Vec::new();

        if !options.preload.is_empty() {
            let coordinator = Arc::clone(&coordinator);
            let urls = options.preload;
            let handle = tokio::spawn(async move {
                coordinator.preload_assets(&urls).await;
            });
            tasks.push(handle.abort_handle());
        }

        {
            let coordinator = Arc::clone(&coordinator);
            let period = options.metrics_interval;
            let handle = tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    metrics_tx.send_replace(coordinator.get_metrics());
                    let report = coordinator.optimize_performance();
                    debug!(?report, "Metrics refreshed");
                }
            });
            tasks.push(handle.abort_handle());
        }

        if let Some(period) = options.frame_interval {
            let coordinator = Arc::clone(&coordinator);
            let handle = tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    ticker.tick().await;
                    coordinator.record_frame();
                }
            });
            tasks.push(handle.abort_handle());
        }

        info!(
            metrics_interval_ms = options.metrics_interval.as_millis() as u64,
            frame_ticker = options.frame_interval.is_some(),
            "Metrics binding started"
        );

        Self {
            coordinator,
            metrics_rx,
            tasks,
        }
    }

    /// Last published snapshot.
    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics_rx.borrow().clone()
    }

    /// Receiver that wakes on every refresh.
    pub fn subscribe(&self) -> watch::Receiver<PerformanceMetrics> {
        self.metrics_rx.clone()
    }

    pub fn coordinator(&self) -> &Arc<PerformanceCoordinator> {
        &self.coordinator
    }

    pub async fn preload_assets(&self, urls: &[String]) {
        self.coordinator.preload_assets(urls).await;
    }

    pub fn optimized_media_url(&self, url: &str) -> String {
        self.coordinator.get_optimized_media_url(url)
    }

    pub fn create_optimized_particles(
        &self,
        kind: &str,
        count: usize,
        bounds: Bounds,
    ) -> Vec<ParticleDescriptor> {
        self.coordinator
            .create_optimized_particles(kind, count, bounds)
    }

    pub fn return_particles(&self, descriptors: Vec<ParticleDescriptor>) -> usize {
        self.coordinator.return_particles(descriptors)
    }

    /// Abort every task and stop the coordinator's monitoring.
    pub fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.coordinator.cleanup();
        info!("Metrics binding stopped");
    }
}

impl Drop for MetricsBinding {
    fn drop(&mut self) {
        self.stop();
    }
}
