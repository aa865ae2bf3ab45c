//! Seedable pseudo-random number generator.
//! Deterministic per seed so spawn sequences can be replayed in tests.

use rand::{Rng as _, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable pseudo-random number generator backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct Rng {
    inner: ChaCha8Rng,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random number in [0, upper_bound). Returns 0 for an empty range.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        self.inner.random_range(0..upper_bound)
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Weighted pick over `(item, weight)` pairs.
    ///
    /// Non-positive weights never win. Returns `None` when the table has no
    /// positive weight at all.
    pub fn pick_weighted<T: Copy>(&mut self, table: &[(T, f64)]) -> Option<T> {
        let total: f64 = table.iter().map(|&(_, w)| w.max(0.0)).sum();
        if !(total > 0.0) {
            return None;
        }

        let mut roll = self.next_f64() * total;
        let mut last = None;
        for &(item, weight) in table {
            if weight <= 0.0 {
                continue;
            }
            roll -= weight;
            last = Some(item);
            if roll < 0.0 {
                return Some(item);
            }
        }
        // Float residue on the final bucket.
        last
    }
}
