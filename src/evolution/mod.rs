pub mod challenge;
pub mod options;
pub mod solver;

pub use challenge::{Challenge, Scalarizer};
pub use options::{SolverOptions, SolverOptionsBuilder};
pub use solver::{EvolutionResult, GenAlgSolver, RunState, CONVERGENCE_TOLERANCE};
