/// Best-effort memory usage of the hosting process.
pub trait MemoryProbePort: Send + Sync {
    /// Bytes in use, or `0` when the platform cannot tell.
    fn used_bytes(&self) -> u64;
}
