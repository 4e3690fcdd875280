//! # Challenge and Scalarizer
//!
//! The [`Challenge`] trait is the fitness evaluator boundary: it maps one
//! chromosome to its objective values. The [`Scalarizer`] trait reduces a
//! generation's raw objective vectors to one ranking scalar per row in
//! multi-objective mode.

use crate::chromosome::Chromosome;

/// Fitness evaluator for a single chromosome.
///
/// Without a scalarizer configured, `score` must return exactly one value;
/// with one, it must return `goal_count` values. The evaluator must be a
/// pure function of the chromosome: both fitness memoization and the
/// solver's carry-over of the incumbent best's score rely on it.
///
/// Evaluation failures are the evaluator's responsibility: return a finite
/// worst-case sentinel score for domain-invalid candidates rather than
/// panicking. Non-finite scores are tolerated and rank after every finite
/// score.
pub trait Challenge<G>: Send + Sync {
    /// Calculates the objective values of a chromosome.
    fn score(&self, chromosome: &Chromosome<G>) -> Vec<f64>;
}

/// Reduces raw objective vectors to ranking scalars in multi-objective mode.
pub trait Scalarizer: Send + Sync {
    /// Number of objective values each evaluation must produce.
    fn goal_count(&self) -> usize;

    /// Maps one objective vector per row to one ranking scalar per row.
    fn scalarize(&self, raw_fitness: &[Vec<f64>]) -> Vec<f64>;
}
