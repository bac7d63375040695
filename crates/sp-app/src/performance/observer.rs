use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sp_core::metrics::PerformanceEntry;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Long-lived listener for host performance entries.
///
/// Entries are queued from synchronous code and judged on a background
/// task, which warns on every measure slower than one 60 fps frame.
pub struct PerformanceObserver {
    tx: Option<mpsc::UnboundedSender<PerformanceEntry>>,
    slow: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl PerformanceObserver {
    /// Must be called from within a Tokio runtime.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PerformanceEntry>();
        let slow = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&slow);

        let handle = tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if entry.is_slow() {
                    counter.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        name = %entry.name,
                        duration_ms = entry.duration_ms,
                        "Slow operation detected"
                    );
                }
            }
            debug!("Performance observer stopped");
        });

        Self {
            tx: Some(tx),
            slow,
            handle: Some(handle),
        }
    }

    /// Queue an entry. Returns `false` once the observer is disconnected.
    pub fn observe(&self, entry: PerformanceEntry) -> bool {
        match &self.tx {
            Some(tx) => tx.send(entry).is_ok(),
            None => false,
        }
    }

    /// Slow measures seen so far.
    pub fn slow_operations(&self) -> u64 {
        self.slow.load(Ordering::Relaxed)
    }

    pub fn is_connected(&self) -> bool {
        self.tx.is_some()
    }

    /// Stop listening. Entries still queued are dropped.
    pub fn disconnect(&mut self) {
        self.tx = None;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PerformanceObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}
