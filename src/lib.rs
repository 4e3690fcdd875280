//! # gensolver
//!
//! A generational genetic-algorithm solver library. The engine is generic
//! over the chromosome representation: implement
//! [`GeneSpace`](chromosome::GeneSpace) for your gene type and
//! [`Challenge`](evolution::Challenge) for your fitness evaluator, pick a
//! selection strategy, and let the solver iterate.
//!
//! ## Example
//!
//! ```rust
//! use gensolver::chromosome::{Chromosome, GeneSpace};
//! use gensolver::evolution::{Challenge, GenAlgSolver, SolverOptions};
//! use gensolver::rng::RandomNumberGenerator;
//! use gensolver::selection::SelectionMethod;
//!
//! #[derive(Clone, Debug)]
//! struct DigitSpace;
//!
//! impl GeneSpace for DigitSpace {
//!     type Gene = u8;
//!
//!     fn n_genes(&self) -> usize {
//!         4
//!     }
//!
//!     fn random_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> u8 {
//!         rng.gen_index(10) as u8
//!     }
//! }
//!
//! struct SumChallenge;
//!
//! impl Challenge<u8> for SumChallenge {
//!     fn score(&self, chromosome: &Chromosome<u8>) -> Vec<f64> {
//!         vec![chromosome.genes().iter().map(|&g| g as f64).sum()]
//!     }
//! }
//!
//! fn main() -> gensolver::Result<()> {
//!     let options = SolverOptions::builder()
//!         .n_genes(4)
//!         .pop_size(10)
//!         .max_gen(20)
//!         .selection_method(SelectionMethod::TwoByTwo)
//!         .random_seed(42)
//!         .build()?;
//!
//!     let mut solver = GenAlgSolver::new(DigitSpace, SumChallenge, options)?;
//!     let result = solver.solve(None)?;
//!     assert!(result.best_fitness > 0.0);
//!     Ok(())
//! }
//! ```

pub mod breeding;
pub mod caching;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use caching::{CacheStats, MemoizedChallenge};
pub use chromosome::{Chromosome, GeneSpace};
pub use error::{Result, SolverError};
pub use evolution::{
    Challenge, EvolutionResult, GenAlgSolver, RunState, Scalarizer, SolverOptions,
};
pub use population::Population;
pub use selection::SelectionMethod;
