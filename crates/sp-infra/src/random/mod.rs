//! `rand`-backed random sources for the particle batch constructors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sp_core::ports::RandomSourcePort;

/// Non-deterministic source used in production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSourcePort for ThreadRandomSource {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Reproducible source: the same seed yields the same particle batches.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    rng: StdRng,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSourcePort for SeededRandomSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_source_stays_in_unit_interval() {
        let mut source = ThreadRandomSource;
        for _ in 0..1_000 {
            let v = source.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandomSource::new(2025);
        let mut b = SeededRandomSource::new(2025);
        let left: Vec<f64> = (0..16).map(|_| a.next_f64()).collect();
        let right: Vec<f64> = (0..16).map(|_| b.next_f64()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn next_index_is_in_range() {
        let mut source = SeededRandomSource::new(7);
        for _ in 0..500 {
            assert!(source.next_index(3) < 3);
        }
    }
}
