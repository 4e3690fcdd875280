//! # Error Types
//!
//! This module defines the custom error types for the solver library. Fatal
//! errors (invalid configuration) are raised when a solver or its options are
//! constructed; the generational loop itself never aborts on a single bad
//! fitness evaluation, since evaluators are expected to return a finite
//! worst-case sentinel score for invalid candidates.
//!
//! ## Examples
//!
//! ```rust
//! use gensolver::error::{Result, SolverError};
//!
//! fn pick_best(fitness: &[f64]) -> Result<f64> {
//!     fitness
//!         .iter()
//!         .cloned()
//!         .fold(None, |best: Option<f64>, f| match best {
//!             Some(b) if b >= f => Some(b),
//!             _ => Some(f),
//!         })
//!         .ok_or(SolverError::EmptyPopulation)
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the solver.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Error that occurs when an invalid configuration is provided.
    ///
    /// All configuration errors are raised at construction time, never
    /// mid-run.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a fitness evaluator violates its contract,
    /// e.g. by returning the wrong number of objective values.
    #[error("Fitness evaluation error: {0}")]
    FitnessEvaluation(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when NaN or infinity values poison a computation
    /// that requires finite inputs.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for solver operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `SolverError`.
pub type Result<T> = std::result::Result<T, SolverError>;
