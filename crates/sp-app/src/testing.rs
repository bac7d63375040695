//! Test doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use async_trait::async_trait;
use mockall::mock;
use sp_core::media::MediaBlob;
use sp_core::ports::{ClockPort, FetchError, MediaFetcherPort, MemoryProbePort, RandomSourcePort};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Clock that only moves when told to.
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

pub struct FixedMemoryProbe {
    bytes: AtomicU64,
}

impl FixedMemoryProbe {
    pub fn new(bytes: u64) -> Self {
        Self {
            bytes: AtomicU64::new(bytes),
        }
    }

    pub fn set(&self, bytes: u64) {
        self.bytes.store(bytes, Ordering::SeqCst);
    }
}

impl MemoryProbePort for FixedMemoryProbe {
    fn used_bytes(&self) -> u64 {
        self.bytes.load(Ordering::SeqCst)
    }
}

/// Cycles through a fixed list of samples.
pub struct ScriptedRandom {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSourcePort for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

mock! {
    pub Fetcher {}

    #[async_trait]
    impl MediaFetcherPort for Fetcher {
        async fn fetch(&self, url: &str) -> Result<MediaBlob, FetchError>;
    }
}

pub fn png(bytes: &[u8]) -> MediaBlob {
    MediaBlob::new(bytes.to_vec(), Some("image/png".to_string()))
}
