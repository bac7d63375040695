pub trait ClockPort: Send + Sync {
    /// Wall-clock milliseconds since the UNIX epoch.
    fn now_ms(&self) -> i64;
}
