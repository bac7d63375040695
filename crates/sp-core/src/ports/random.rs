/// Source of uniform random numbers for the particle batch constructors.
///
/// Production wiring uses a thread RNG; tests inject a seeded or scripted
/// source so batches are reproducible.
pub trait RandomSourcePort: Send {
    /// Uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}
