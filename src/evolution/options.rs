//! # SolverOptions
//!
//! The `SolverOptions` struct represents the configuration of a solver run:
//! gene count, population size, rates, selection strategy, excluded genes,
//! and termination bounds. Options are validated and frozen when built;
//! every configuration error is raised here, never mid-run.
//!
//! ## Example
//!
//! ```rust
//! use gensolver::evolution::options::SolverOptions;
//! use gensolver::selection::SelectionMethod;
//!
//! let options = SolverOptions::builder()
//!     .n_genes(30)
//!     .pop_size(50)
//!     .max_gen(100)
//!     .selection_method(SelectionMethod::TwoByTwo)
//!     .n_crossover_points(2)
//!     .random_seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_pop_keep(), 25);
//! ```

use crate::error::{Result, SolverError};
use crate::selection::SelectionMethod;

/// Immutable, validated configuration of a solver run.
///
/// Derived quantities are computed once at build time:
/// `pop_keep = max(floor(selection_rate * pop_size), 2)`,
/// `n_matings = floor((pop_size - pop_keep) / 2)`, and
/// `n_mutations = ceil((pop_size - 1) * n_genes * mutation_rate)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SolverOptions {
    n_genes: usize,
    pop_size: usize,
    max_gen: usize,
    max_conv: usize,
    mutation_rate: f64,
    selection_rate: f64,
    selection_method: SelectionMethod,
    excluded_genes: Vec<usize>,
    n_crossover_points: usize,
    random_seed: Option<u64>,
    prune_duplicates: bool,
    parallel_threshold: usize,
    // derived
    pop_keep: usize,
    n_matings: usize,
    n_mutations: usize,
    allowed_genes: Vec<usize>,
}

impl SolverOptions {
    /// Returns a builder for creating a `SolverOptions` instance.
    pub fn builder() -> SolverOptionsBuilder {
        SolverOptionsBuilder::default()
    }

    pub fn get_n_genes(&self) -> usize {
        self.n_genes
    }

    pub fn get_pop_size(&self) -> usize {
        self.pop_size
    }

    pub fn get_max_gen(&self) -> usize {
        self.max_gen
    }

    pub fn get_max_conv(&self) -> usize {
        self.max_conv
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_selection_rate(&self) -> f64 {
        self.selection_rate
    }

    pub fn get_selection_method(&self) -> SelectionMethod {
        self.selection_method
    }

    pub fn get_excluded_genes(&self) -> &[usize] {
        &self.excluded_genes
    }

    pub fn get_n_crossover_points(&self) -> usize {
        self.n_crossover_points
    }

    pub fn get_random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn get_prune_duplicates(&self) -> bool {
        self.prune_duplicates
    }

    /// Minimum number of rows evaluated concurrently.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Number of top-ranked rows kept as the elite, never below 2.
    pub fn get_pop_keep(&self) -> usize {
        self.pop_keep
    }

    /// Number of parent pairs recombined per generation.
    pub fn get_n_matings(&self) -> usize {
        self.n_matings
    }

    /// Number of mutation events applied per generation.
    pub fn get_n_mutations(&self) -> usize {
        self.n_mutations
    }

    /// Gene indices eligible for crossover points and mutation, i.e. all
    /// genes minus the excluded set, ascending.
    pub fn get_allowed_genes(&self) -> &[usize] {
        &self.allowed_genes
    }
}

/// Builder for `SolverOptions`.
///
/// Provides a fluent interface. Defaults: 1000 generations, 100 stagnant
/// generations, population 100, mutation rate 0.15, selection rate 0.5,
/// roulette-wheel selection, one crossover point.
#[derive(Debug, Clone, Default)]
pub struct SolverOptionsBuilder {
    n_genes: Option<usize>,
    pop_size: Option<usize>,
    max_gen: Option<usize>,
    max_conv: Option<usize>,
    mutation_rate: Option<f64>,
    selection_rate: Option<f64>,
    selection_method: Option<SelectionMethod>,
    excluded_genes: Option<Vec<usize>>,
    n_crossover_points: Option<usize>,
    random_seed: Option<u64>,
    prune_duplicates: Option<bool>,
    parallel_threshold: Option<usize>,
}

impl SolverOptionsBuilder {
    /// Sets the number of genes per chromosome. Required.
    pub fn n_genes(mut self, value: usize) -> Self {
        self.n_genes = Some(value);
        self
    }

    /// Sets the population size.
    pub fn pop_size(mut self, value: usize) -> Self {
        self.pop_size = Some(value);
        self
    }

    /// Sets the maximum number of generations.
    pub fn max_gen(mut self, value: usize) -> Self {
        self.max_gen = Some(value);
        self
    }

    /// Sets the maximum number of stagnant generations before the run is
    /// considered converged.
    pub fn max_conv(mut self, value: usize) -> Self {
        self.max_conv = Some(value);
        self
    }

    /// Sets the mutation rate, in `[0, 1]`.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the selection rate, in `(0, 1]`; the kept elite is
    /// floor-clamped so it is never below 2.
    pub fn selection_rate(mut self, value: f64) -> Self {
        self.selection_rate = Some(value);
        self
    }

    /// Sets the selection strategy.
    pub fn selection_method(mut self, value: SelectionMethod) -> Self {
        self.selection_method = Some(value);
        self
    }

    /// Sets the gene indices that must never change during the run.
    pub fn excluded_genes<I>(mut self, value: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.excluded_genes = Some(value.into_iter().collect());
        self
    }

    /// Sets the number of crossover points.
    pub fn n_crossover_points(mut self, value: usize) -> Self {
        self.n_crossover_points = Some(value);
        self
    }

    /// Seeds the solver's random source for a reproducible run.
    pub fn random_seed(mut self, value: u64) -> Self {
        self.random_seed = Some(value);
        self
    }

    /// Enables adjacent-duplicate pruning after mutation.
    pub fn prune_duplicates(mut self, value: bool) -> Self {
        self.prune_duplicates = Some(value);
        self
    }

    /// Sets the minimum number of rows to evaluate in parallel.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Validates and builds the `SolverOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Configuration` when any option is out of its
    /// documented range: missing or zero gene count, population below 2,
    /// rates outside their intervals, crossover points not in
    /// `[1, n_genes)`, excluded genes out of range, or no gene left
    /// unexcluded.
    pub fn build(self) -> Result<SolverOptions> {
        let n_genes = self
            .n_genes
            .ok_or_else(|| SolverError::Configuration("Gene count must be provided".to_string()))?;
        if n_genes < 1 {
            return Err(SolverError::Configuration(
                "Gene count must be at least 1".to_string(),
            ));
        }

        let pop_size = self.pop_size.unwrap_or(100);
        if pop_size < 2 {
            return Err(SolverError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }

        let max_gen = self.max_gen.unwrap_or(1000);
        if max_gen < 1 {
            return Err(SolverError::Configuration(
                "Maximum generations must be at least 1".to_string(),
            ));
        }

        let max_conv = self.max_conv.unwrap_or(100);
        if max_conv < 1 {
            return Err(SolverError::Configuration(
                "Maximum stagnant generations must be at least 1".to_string(),
            ));
        }

        let mutation_rate = self.mutation_rate.unwrap_or(0.15);
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(SolverError::Configuration(format!(
                "Mutation rate must be in [0, 1], got {}",
                mutation_rate
            )));
        }

        let selection_rate = self.selection_rate.unwrap_or(0.5);
        if !(selection_rate > 0.0 && selection_rate <= 1.0) {
            return Err(SolverError::Configuration(format!(
                "Selection rate must be in (0, 1], got {}",
                selection_rate
            )));
        }

        let mut excluded_genes = self.excluded_genes.unwrap_or_default();
        excluded_genes.sort_unstable();
        excluded_genes.dedup();
        if let Some(&out_of_range) = excluded_genes.iter().find(|&&g| g >= n_genes) {
            return Err(SolverError::Configuration(format!(
                "Excluded gene index {} is out of range for {} genes",
                out_of_range, n_genes
            )));
        }

        let allowed_genes: Vec<usize> =
            (0..n_genes).filter(|g| !excluded_genes.contains(g)).collect();
        if allowed_genes.is_empty() {
            return Err(SolverError::Configuration(
                "Every gene is excluded; nothing can mutate or cross over".to_string(),
            ));
        }

        let n_crossover_points = self.n_crossover_points.unwrap_or(1);
        if n_crossover_points < 1 || n_crossover_points >= n_genes {
            return Err(SolverError::Configuration(format!(
                "Crossover point count must be in [1, {}), got {}",
                n_genes, n_crossover_points
            )));
        }
        if n_crossover_points > allowed_genes.len() {
            return Err(SolverError::Configuration(format!(
                "Cannot place {} crossover points on {} allowed genes",
                n_crossover_points,
                allowed_genes.len()
            )));
        }

        let selection_method = self.selection_method.unwrap_or(SelectionMethod::RouletteWheel);

        let pop_keep = ((selection_rate * pop_size as f64).floor() as usize).max(2);
        let n_matings = (pop_size - pop_keep) / 2;
        let n_mutations = ((pop_size - 1) as f64 * n_genes as f64 * mutation_rate).ceil() as usize;

        Ok(SolverOptions {
            n_genes,
            pop_size,
            max_gen,
            max_conv,
            mutation_rate,
            selection_rate,
            selection_method,
            excluded_genes,
            n_crossover_points,
            random_seed: self.random_seed,
            prune_duplicates: self.prune_duplicates.unwrap_or(false),
            parallel_threshold: self.parallel_threshold.unwrap_or(1000),
            pop_keep,
            n_matings,
            n_mutations,
            allowed_genes,
        })
    }
}
