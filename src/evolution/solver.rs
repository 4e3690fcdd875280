//! # GenAlgSolver
//!
//! The generational loop. Each generation selects parent pairs from the
//! ranked population, writes their offspring over the lowest-ranked rows,
//! mutates everything but the incumbent best, optionally prunes adjacent
//! duplicates, re-evaluates, re-ranks and checks for stagnation. Run state
//! survives across `solve` calls, so a run can be paused, persisted and
//! resumed with a fresh iteration budget.

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::breeding::{create_offspring, crossover_points, mutate_population, OffspringSlot};
use crate::chromosome::{Chromosome, GeneSpace};
use crate::error::{Result, SolverError};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::{boltzmann::INITIAL_TEMPERATURE, Selector};

use super::challenge::{Challenge, Scalarizer};
use super::options::SolverOptions;

/// Absolute tolerance under which two best-fitness values are considered
/// numerically indistinguishable for stagnation counting.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// Everything carried across `solve` invocations.
///
/// Exposed so a caller can serialize a paused run and restore it later;
/// with the `serde` feature the whole state derives `Serialize` and
/// `Deserialize`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct RunState<G> {
    /// Generations completed so far, across all `solve` calls.
    pub generation: usize,
    /// Best individual seen at the end of the latest generation.
    pub best_individual: Option<Chromosome<G>>,
    /// Its scalar fitness; `None` before the first completed generation.
    pub best_fitness: Option<f64>,
    /// Its raw objective values.
    pub best_raw_fitness: Vec<f64>,
    /// The population with its fitness arrays, sorted by descending fitness.
    pub population: Population<G>,
    /// Mean population fitness entering each generation.
    pub mean_fitness_history: Vec<f64>,
    /// Best fitness entering each generation.
    pub max_fitness_history: Vec<f64>,
    /// Boltzmann selection temperature.
    pub temperature: f64,
    /// Whether the latest `solve` call ended by stagnation rather than by
    /// exhausting its iteration budget.
    pub converged: bool,
}

impl<G> RunState<G>
where
    G: Clone + PartialEq,
{
    fn fresh(population: Population<G>) -> Self {
        Self {
            generation: 0,
            best_individual: None,
            best_fitness: None,
            best_raw_fitness: Vec::new(),
            population,
            mean_fitness_history: Vec::new(),
            max_fitness_history: Vec::new(),
            temperature: INITIAL_TEMPERATURE,
            converged: false,
        }
    }
}

/// The outcome of a `solve` call.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<G> {
    /// The best individual found so far.
    pub best_individual: Chromosome<G>,
    /// Its scalar fitness.
    pub best_fitness: f64,
    /// Its raw objective values.
    pub best_raw_fitness: Vec<f64>,
    /// Total generations completed, across all `solve` calls.
    pub generations: usize,
    /// Whether the run stopped on stagnation.
    pub converged: bool,
}

/// A generational genetic-algorithm solver, generic over the chromosome
/// representation (`Sp`) and the fitness evaluator (`C`).
pub struct GenAlgSolver<Sp, C>
where
    Sp: GeneSpace,
    C: Challenge<Sp::Gene>,
{
    space: Sp,
    challenge: C,
    options: SolverOptions,
    scalarizer: Option<Box<dyn Scalarizer>>,
    selector: Selector,
    rng: RandomNumberGenerator,
    state: Option<RunState<Sp::Gene>>,
}

impl<Sp, C> GenAlgSolver<Sp, C>
where
    Sp: GeneSpace,
    C: Challenge<Sp::Gene>,
{
    /// Creates a solver from a gene space, a fitness evaluator and
    /// validated options.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Configuration` if the gene space's declared
    /// gene count disagrees with the options.
    pub fn new(space: Sp, challenge: C, options: SolverOptions) -> Result<Self> {
        if space.n_genes() != options.get_n_genes() {
            return Err(SolverError::Configuration(format!(
                "Gene space declares {} genes but options expect {}",
                space.n_genes(),
                options.get_n_genes()
            )));
        }

        let selector = Selector::new(
            options.get_selection_method(),
            options.get_pop_keep(),
            options.get_n_matings(),
        );
        let rng = match options.get_random_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        Ok(Self {
            space,
            challenge,
            options,
            scalarizer: None,
            selector,
            rng,
            state: None,
        })
    }

    /// Configures multi-objective mode: the evaluator must return
    /// `scalarizer.goal_count()` objective values per chromosome, and the
    /// scalarizer reduces them to the ranking scalar.
    pub fn with_scalarizer(mut self, scalarizer: Box<dyn Scalarizer>) -> Self {
        self.scalarizer = Some(scalarizer);
        self
    }

    /// The configured options.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// The run state, once at least one `solve` call has happened.
    pub fn state(&self) -> Option<&RunState<Sp::Gene>> {
        self.state.as_ref()
    }

    /// Restores a previously captured run state, e.g. after
    /// deserialization. The next `solve` call continues from it.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Configuration` if the stored population does
    /// not match the configured population size or gene count.
    pub fn restore_state(&mut self, state: RunState<Sp::Gene>) -> Result<()> {
        if state.population.len() != self.options.get_pop_size() {
            return Err(SolverError::Configuration(format!(
                "Stored population has {} rows, options expect {}",
                state.population.len(),
                self.options.get_pop_size()
            )));
        }
        if let Some(row) = state.population.chromosomes().first() {
            if row.len() != self.options.get_n_genes() {
                return Err(SolverError::Configuration(format!(
                    "Stored chromosomes have {} genes, options expect {}",
                    row.len(),
                    self.options.get_n_genes()
                )));
            }
        }
        self.state = Some(state);
        Ok(())
    }

    /// Discards any stored run state; the next `solve` call starts fresh.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Runs the generational loop for up to `min(niter, max_gen)`
    /// generations (all of `max_gen` when `niter` is `None`), or until the
    /// best fitness stagnates for more than `max_conv` generations.
    ///
    /// Continues from stored run state when present, so repeated calls
    /// extend the same run. Both termination conditions are checked at
    /// generation end, never mid-generation.
    pub fn solve(&mut self, niter: Option<usize>) -> Result<EvolutionResult<Sp::Gene>> {
        let budget = match niter {
            Some(n) => n.min(self.options.get_max_gen()),
            None => self.options.get_max_gen(),
        };

        let mut state = match self.state.take() {
            Some(state) => {
                info!(
                    generation = state.generation,
                    "continuing run from stored state"
                );
                state
            }
            None => RunState::fresh(self.initial_population()?),
        };

        let (fitness, raw_fitness) = self.evaluate_rows(state.population.chromosomes())?;
        state.population.set_scores(fitness, raw_fitness)?;
        state.population.sort_by_fitness();

        let mut stagnant = 0usize;
        let mut converged = false;

        for _ in 0..budget {
            state.generation += 1;
            state
                .mean_fitness_history
                .push(state.population.mean_fitness());
            state.max_fitness_history.push(state.population.fitness()[0]);

            self.breed_generation(&mut state)?;

            mutate_population(
                &mut state.population,
                self.options.get_n_mutations(),
                self.options.get_allowed_genes(),
                &self.space,
                &mut self.rng,
            );

            if self.options.get_prune_duplicates() {
                let removed = state.population.prune_adjacent_duplicates();
                if removed > 0 {
                    debug!(removed, "replacing duplicate chromosomes");
                    let refill = self.space.refill(removed, &mut self.rng);
                    state.population.extend_rows(refill);
                }
            }

            let (fitness, raw_fitness) =
                self.evaluate_rows(&state.population.chromosomes()[1..])?;
            state.population.set_tail_scores(fitness, raw_fitness)?;
            state.population.sort_by_fitness();

            let (best, best_fitness, best_raw) = state
                .population
                .best()
                .ok_or(SolverError::EmptyPopulation)?;
            match state.best_fitness {
                Some(previous) if (best_fitness - previous).abs() <= CONVERGENCE_TOLERANCE => {
                    stagnant += 1;
                }
                _ => stagnant = 0,
            }
            state.best_individual = Some(best.clone());
            state.best_fitness = Some(best_fitness);
            state.best_raw_fitness = best_raw.to_vec();

            info!(
                generation = state.generation,
                best_fitness,
                best_raw_fitness = ?state.best_raw_fitness,
                "generation complete"
            );
            trace!(best_individual = ?state.best_individual, "best individual");

            debug_assert_eq!(state.population.len(), self.options.get_pop_size());

            if stagnant > self.options.get_max_conv() {
                info!(
                    generation = state.generation,
                    stagnant, "terminating on stagnation"
                );
                converged = true;
                break;
            }
        }

        state.converged = converged;
        if state.best_individual.is_none() {
            // zero-budget call: report the evaluated, ranked initial best
            if let Some((best, best_fitness, best_raw)) = state.population.best() {
                state.best_individual = Some(best.clone());
                state.best_fitness = Some(best_fitness);
                state.best_raw_fitness = best_raw.to_vec();
            }
        }
        let result = EvolutionResult {
            best_individual: state
                .best_individual
                .clone()
                .ok_or(SolverError::EmptyPopulation)?,
            best_fitness: state.best_fitness.unwrap_or(f64::NAN),
            best_raw_fitness: state.best_raw_fitness.clone(),
            generations: state.generation,
            converged,
        };
        self.state = Some(state);
        Ok(result)
    }

    /// Builds the initial population from the gene space.
    fn initial_population(&mut self) -> Result<Population<Sp::Gene>> {
        let pop_size = self.options.get_pop_size();
        let mut chromosomes = Vec::with_capacity(pop_size);
        for _ in 0..pop_size {
            let chromosome = self.space.new_chromosome(&mut self.rng);
            if chromosome.len() != self.options.get_n_genes() {
                return Err(SolverError::Configuration(format!(
                    "Gene space produced a chromosome of length {}, expected {}",
                    chromosome.len(),
                    self.options.get_n_genes()
                )));
            }
            chromosomes.push(chromosome);
        }
        Ok(Population::from_chromosomes(chromosomes))
    }

    /// Selects parent pairs and writes their offspring over the
    /// lowest-ranked rows, leaving the top `pop_keep` rows untouched.
    fn breed_generation(&mut self, state: &mut RunState<Sp::Gene>) -> Result<()> {
        let (mothers, fathers) = self.selector.select_parents(
            state.population.fitness(),
            &mut state.temperature,
            &mut self.rng,
        )?;

        let pop_size = self.options.get_pop_size();
        for (mating, (&mother, &father)) in mothers.iter().zip(fathers.iter()).enumerate() {
            let points = crossover_points(
                self.options.get_allowed_genes(),
                self.options.get_n_crossover_points(),
                &mut self.rng,
            );
            let parent_a = state.population.row(mother).clone();
            let parent_b = state.population.row(father).clone();

            let first = create_offspring(&parent_a, &parent_b, &points, OffspringSlot::First);
            let second = create_offspring(&parent_a, &parent_b, &points, OffspringSlot::Second);

            state.population.set_row(pop_size - 1 - 2 * mating, first);
            state.population.set_row(pop_size - 2 - 2 * mating, second);
        }
        Ok(())
    }

    /// Evaluates a slice of rows, in parallel once the slice is at least
    /// `parallel_threshold` long. Results are stored at each row's original
    /// index regardless of completion order.
    fn evaluate_rows(
        &self,
        rows: &[Chromosome<Sp::Gene>],
    ) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
        let expected = self.scalarizer.as_ref().map_or(1, |s| s.goal_count());

        let raw_fitness: Vec<Vec<f64>> =
            if rows.len() >= self.options.get_parallel_threshold() {
                rows.par_iter().map(|row| self.challenge.score(row)).collect()
            } else {
                rows.iter().map(|row| self.challenge.score(row)).collect()
            };

        for (index, values) in raw_fitness.iter().enumerate() {
            if values.len() != expected {
                return Err(SolverError::FitnessEvaluation(format!(
                    "Evaluator returned {} objective values for row {}, expected {}",
                    values.len(),
                    index,
                    expected
                )));
            }
        }

        let fitness = match &self.scalarizer {
            None => raw_fitness.iter().map(|values| values[0]).collect(),
            Some(scalarizer) => {
                let scalars = scalarizer.scalarize(&raw_fitness);
                if scalars.len() != rows.len() {
                    return Err(SolverError::FitnessEvaluation(format!(
                        "Scalarizer returned {} scalars for {} rows",
                        scalars.len(),
                        rows.len()
                    )));
                }
                scalars
            }
        };

        Ok((fitness, raw_fitness))
    }
}
