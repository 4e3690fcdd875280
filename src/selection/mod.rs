//! # Parent Selection
//!
//! The [`Selector`] chooses the parent index pairs recombined each
//! generation, according to one of five strategies. The probability-driven
//! strategies (`roulette_wheel`, `random`, `boltzmann`) map uniform draws
//! through a cumulative-probability table over the kept elite; `two_by_two`
//! pairs elite rows deterministically; `tournament` runs 3-way contests over
//! the offspring-eligible range.

pub mod boltzmann;
pub mod interval;
pub mod tournament;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{Result, SolverError};
use crate::rng::RandomNumberGenerator;

/// The recognized selection strategies.
///
/// Unrecognized strategy names fail at configuration time, never at
/// selection time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Selection probability decreases linearly with rank among the elite.
    RouletteWheel,
    /// Uniform selection over the elite.
    Random,
    /// Deterministic pairing of consecutive elite rows.
    TwoByTwo,
    /// 3-way tournaments over the offspring-eligible range.
    Tournament,
    /// Annealed, fitness-driven probabilities with a rising temperature.
    Boltzmann,
}

impl SelectionMethod {
    /// All recognized strategy names, for error messages.
    pub const NAMES: [&'static str; 5] = [
        "roulette_wheel",
        "random",
        "two_by_two",
        "tournament",
        "boltzmann",
    ];
}

impl FromStr for SelectionMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roulette_wheel" => Ok(Self::RouletteWheel),
            "random" => Ok(Self::Random),
            "two_by_two" => Ok(Self::TwoByTwo),
            "tournament" => Ok(Self::Tournament),
            "boltzmann" => Ok(Self::Boltzmann),
            other => Err(SolverError::Configuration(format!(
                "Unknown selection strategy '{}'; expected one of {:?}",
                other,
                Self::NAMES
            ))),
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RouletteWheel => "roulette_wheel",
            Self::Random => "random",
            Self::TwoByTwo => "two_by_two",
            Self::Tournament => "tournament",
            Self::Boltzmann => "boltzmann",
        };
        f.write_str(name)
    }
}

/// Chooses mother/father index pairs for recombination.
///
/// The static probability tables (roulette wheel, random) are built once at
/// construction; the Boltzmann table is rebuilt from the current elite
/// fitness every generation.
#[derive(Debug, Clone)]
pub struct Selector {
    method: SelectionMethod,
    prob_intervals: Vec<f64>,
    pop_keep: usize,
    n_matings: usize,
}

impl Selector {
    /// Creates a selector for `n_matings` pairs over an elite of `pop_keep`.
    pub fn new(method: SelectionMethod, pop_keep: usize, n_matings: usize) -> Self {
        let prob_intervals = match method {
            SelectionMethod::RouletteWheel => interval::rank_weighted_intervals(pop_keep),
            SelectionMethod::Random => interval::uniform_intervals(pop_keep),
            _ => Vec::new(),
        };
        Self {
            method,
            prob_intervals,
            pop_keep,
            n_matings,
        }
    }

    /// The configured strategy.
    pub fn method(&self) -> SelectionMethod {
        self.method
    }

    /// Selects the parent index pairs for one generation.
    ///
    /// Returns `(mothers, fathers)`, each of length `n_matings`, every index
    /// within `[0, pop_size)`. `fitness` must be sorted descending;
    /// `temperature` is read and advanced only by the Boltzmann strategy.
    pub fn select_parents(
        &self,
        fitness: &[f64],
        temperature: &mut f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        if fitness.len() < self.pop_keep {
            return Err(SolverError::Configuration(format!(
                "Cannot select from {} individuals with pop_keep {}",
                fitness.len(),
                self.pop_keep
            )));
        }

        match self.method {
            SelectionMethod::RouletteWheel | SelectionMethod::Random => {
                trace!(intervals = ?self.prob_intervals, "selection probabilities for kept population");
                Ok((
                    self.draw_from_intervals(&self.prob_intervals, rng),
                    self.draw_from_intervals(&self.prob_intervals, rng),
                ))
            }
            SelectionMethod::Boltzmann => {
                let intervals =
                    boltzmann::boltzmann_intervals(&fitness[..self.pop_keep], *temperature);
                trace!(?intervals, "selection probabilities for kept population");
                *temperature += 0.1 * *temperature;
                debug!(temperature = *temperature, "temperature increased");
                Ok((
                    self.draw_from_intervals(&intervals, rng),
                    self.draw_from_intervals(&intervals, rng),
                ))
            }
            SelectionMethod::TwoByTwo => {
                let mothers = (0..self.n_matings).map(|i| 2 * i).collect();
                let fathers = (0..self.n_matings).map(|i| 2 * i + 1).collect();
                Ok((mothers, fathers))
            }
            SelectionMethod::Tournament => Ok((
                tournament::select(fitness, self.n_matings, rng),
                tournament::select(fitness, self.n_matings, rng),
            )),
        }
    }

    fn draw_from_intervals(&self, intervals: &[f64], rng: &mut RandomNumberGenerator) -> Vec<usize> {
        (0..self.n_matings)
            .map(|_| interval::interval_index(rng.gen_unit(), intervals, self.pop_keep))
            .collect()
    }
}
