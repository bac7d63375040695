/// Rate reported until the first full second has been observed.
pub const INITIAL_FRAME_RATE: u32 = 60;

const WINDOW_MS: i64 = 1_000;

/// Counts frames and publishes the count once per wall-clock second.
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    frame_count: u32,
    window_start_ms: i64,
    frame_rate: u32,
}

impl FrameRateMonitor {
    pub fn new(now_ms: i64) -> Self {
        Self {
            frame_count: 0,
            window_start_ms: now_ms,
            frame_rate: INITIAL_FRAME_RATE,
        }
    }

    /// Call once per rendered frame.
    pub fn record_frame(&mut self, now_ms: i64) {
        self.frame_count = self.frame_count.saturating_add(1);

        if now_ms - self.window_start_ms >= WINDOW_MS {
            self.frame_rate = self.frame_count;
            self.frame_count = 0;
            self.window_start_ms = now_ms;
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_initial_rate_before_first_window() {
        let mut monitor = FrameRateMonitor::new(0);
        for t in 0..10 {
            monitor.record_frame(t * 16);
        }
        assert_eq!(monitor.frame_rate(), INITIAL_FRAME_RATE);
    }

    #[test]
    fn publishes_frame_count_per_second() {
        let mut monitor = FrameRateMonitor::new(0);
        // 25 frames spaced 40ms apart; the 25th lands on t=1000.
        for i in 1..=25 {
            monitor.record_frame(i * 40);
        }
        assert_eq!(monitor.frame_rate(), 25);
    }

    #[test]
    fn next_window_starts_from_zero() {
        let mut monitor = FrameRateMonitor::new(0);
        monitor.record_frame(1_000);
        assert_eq!(monitor.frame_rate(), 1);

        for i in 1..=10 {
            monitor.record_frame(1_000 + i * 100);
        }
        assert_eq!(monitor.frame_rate(), 10);
    }
}
