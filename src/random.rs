//! Injected randomness for the selection functions

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniform randomness for selection and sampling.
///
/// Injected into the functions that need it so hosts and tests can substitute
/// a seeded source. Implementations must be safe for concurrent use; a
/// registry holding one may be shared across evaluator sessions.
pub trait RandomSource: Send + Sync {
    /// Uniformly pick an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&self, len: usize) -> usize;

    /// Sample `amount` distinct indices from `0..len` without replacement.
    /// Callers guarantee `amount <= len`.
    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize>;
}

/// Default source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut rand::rng(), len, amount).into_vec()
    }
}

/// Deterministic source for tests, seeded once and locked per draw.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a source producing the same draw sequence for the same seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.random_range(0..len))
    }

    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        self.with_rng(|rng| index::sample(rng, len, amount).into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_bounds() {
        let source = ThreadRandom;
        for _ in 0..100 {
            assert!(source.pick_index(3) < 3);
        }
        let sample = source.sample_indices(5, 3);
        assert_eq!(sample.len(), 3);
        assert!(sample.iter().all(|&i| i < 5));
    }

    #[test]
    fn test_sample_is_without_replacement() {
        let source = ThreadRandom;
        let mut sample = source.sample_indices(10, 10);
        sample.sort_unstable();
        assert_eq!(sample, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        let draws_a: Vec<usize> = (0..20).map(|_| a.pick_index(100)).collect();
        let draws_b: Vec<usize> = (0..20).map(|_| b.pick_index(100)).collect();
        assert_eq!(draws_a, draws_b);
        assert_eq!(a.sample_indices(8, 4), b.sample_indices(8, 4));
    }
}
