//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single random source used by
//! every stochastic operator in the solver: parent selection, crossover-point
//! choice and mutation targeting all draw from it. It wraps the `rand`
//! crate's `StdRng` so that a run can be made reproducible by seeding it
//! once at solver construction.
//!
//! ## Example
//!
//! ```rust
//! use gensolver::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let draw = rng.gen_unit();
//! assert!((0.0..1.0).contains(&draw));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// solver needs: unit-interval values, bounded indices, and distinct index
/// samples.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system
    /// entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators built from the same seed produce identical sequences,
    /// which makes whole solver runs reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a specified number of random floating-point numbers within
    /// the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }

    /// Generates a single uniform value in `[0, 1)`.
    pub fn gen_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Generates a uniform index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero; callers guard against empty ranges.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws `n` distinct indices uniformly from `[0, upper)` without
    /// replacement, in draw order.
    ///
    /// If `n` exceeds `upper`, every index is returned.
    pub fn sample_distinct(&mut self, upper: usize, n: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..upper).collect();
        let n = n.min(upper);
        for i in 0..n {
            let j = self.rng.gen_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(n);
        pool
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
