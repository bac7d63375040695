use serde::{Deserialize, Serialize};

/// Anything slower than one 60 fps frame is worth a warning.
pub const SLOW_OPERATION_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceEntryKind {
    Measure,
    Navigation,
}

/// A timing reported by the host (a named measure or a navigation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub name: String,
    pub kind: PerformanceEntryKind,
    pub duration_ms: f64,
}

impl PerformanceEntry {
    pub fn measure(name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            name: name.into(),
            kind: PerformanceEntryKind::Measure,
            duration_ms,
        }
    }

    pub fn navigation(name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            name: name.into(),
            kind: PerformanceEntryKind::Navigation,
            duration_ms,
        }
    }

    /// Only measures are judged; navigations are expected to be slow.
    pub fn is_slow(&self) -> bool {
        self.kind == PerformanceEntryKind::Measure && self.duration_ms > SLOW_OPERATION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_measure_is_flagged() {
        assert!(PerformanceEntry::measure("hero-render", 16.5).is_slow());
        assert!(!PerformanceEntry::measure("hero-render", 16.0).is_slow());
    }

    #[test]
    fn navigation_is_never_flagged() {
        assert!(!PerformanceEntry::navigation("/events", 900.0).is_slow());
    }
}
