//! # Population Store
//!
//! The [`Population`] holds the ordered set of chromosomes together with two
//! parallel score arrays: the scalar fitness used for ranking and the raw
//! (possibly vector-valued) objective values kept for reporting. The three
//! arrays always have identical length and index correspondence at every
//! point where the population is externally observed, and the population is
//! kept sorted by descending scalar fitness after each evaluation.

use std::cmp::Ordering;

use crate::chromosome::Chromosome;
use crate::error::{Result, SolverError};

/// Scalar fitness placeholder for rows that have not been evaluated yet.
///
/// Placeholders only ever exist between a structural change (initialization,
/// refill) and the evaluation that immediately follows it.
const UNEVALUATED: f64 = f64::NAN;

/// The ordered collection of chromosomes under consideration, with their
/// scalar fitness and raw objective values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct Population<G> {
    chromosomes: Vec<Chromosome<G>>,
    fitness: Vec<f64>,
    raw_fitness: Vec<Vec<f64>>,
}

impl<G> Population<G>
where
    G: Clone + PartialEq,
{
    /// Creates a population from chromosomes, with all scores unevaluated.
    pub fn from_chromosomes(chromosomes: Vec<Chromosome<G>>) -> Self {
        let n = chromosomes.len();
        Self {
            chromosomes,
            fitness: vec![UNEVALUATED; n],
            raw_fitness: vec![Vec::new(); n],
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns `true` if the population has no rows.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// All chromosomes, in rank order after a sort.
    pub fn chromosomes(&self) -> &[Chromosome<G>] {
        &self.chromosomes
    }

    /// Scalar fitness values, index-aligned with the chromosomes.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Raw objective vectors, index-aligned with the chromosomes.
    pub fn raw_fitness(&self) -> &[Vec<f64>] {
        &self.raw_fitness
    }

    /// One chromosome row.
    pub fn row(&self, index: usize) -> &Chromosome<G> {
        &self.chromosomes[index]
    }

    /// Mutable access to one row, for the mutation operator.
    pub(crate) fn row_mut(&mut self, index: usize) -> &mut Chromosome<G> {
        &mut self.chromosomes[index]
    }

    /// Replaces one chromosome row wholesale (offspring write). The row's
    /// scores go stale until the next evaluation.
    pub fn set_row(&mut self, index: usize, chromosome: Chromosome<G>) {
        self.chromosomes[index] = chromosome;
        self.fitness[index] = UNEVALUATED;
        self.raw_fitness[index].clear();
    }

    /// Stores scores for every row.
    pub fn set_scores(&mut self, fitness: Vec<f64>, raw_fitness: Vec<Vec<f64>>) -> Result<()> {
        if fitness.len() != self.len() || raw_fitness.len() != self.len() {
            return Err(SolverError::FitnessEvaluation(format!(
                "Expected {} scores, got {} scalar / {} raw",
                self.len(),
                fitness.len(),
                raw_fitness.len()
            )));
        }
        self.fitness = fitness;
        self.raw_fitness = raw_fitness;
        Ok(())
    }

    /// Stores scores for rows `1..`, carrying row 0's scores over unchanged.
    ///
    /// This is the re-evaluation path of the generational loop: row 0 is the
    /// incumbent best and its fitness is reused, which assumes the evaluator
    /// is a pure function of the chromosome.
    pub fn set_tail_scores(&mut self, fitness: Vec<f64>, raw_fitness: Vec<Vec<f64>>) -> Result<()> {
        if self.is_empty() {
            return Err(SolverError::EmptyPopulation);
        }
        if fitness.len() != self.len() - 1 || raw_fitness.len() != self.len() - 1 {
            return Err(SolverError::FitnessEvaluation(format!(
                "Expected {} tail scores, got {} scalar / {} raw",
                self.len() - 1,
                fitness.len(),
                raw_fitness.len()
            )));
        }
        self.fitness.truncate(1);
        self.fitness.extend(fitness);
        self.raw_fitness.truncate(1);
        self.raw_fitness.extend(raw_fitness);
        Ok(())
    }

    /// Sorts all three arrays together by descending scalar fitness.
    ///
    /// The sort is stable, so equal-fitness rows keep their relative order
    /// and sorting twice is idempotent. NaN scores order after every finite
    /// score.
    pub fn sort_by_fitness(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&i, &j| {
            let (a, b) = (self.fitness[i], self.fitness[j]);
            b.partial_cmp(&a).unwrap_or_else(|| {
                if b.is_nan() {
                    Ordering::Less
                } else if a.is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
        });

        self.chromosomes = order.iter().map(|&i| self.chromosomes[i].clone()).collect();
        self.raw_fitness = order.iter().map(|&i| self.raw_fitness[i].clone()).collect();
        self.fitness = order.iter().map(|&i| self.fitness[i]).collect();
    }

    /// Mean scalar fitness over all rows.
    pub fn mean_fitness(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.fitness.iter().sum::<f64>() / self.len() as f64
    }

    /// The top-ranked row with its scores, if any.
    pub fn best(&self) -> Option<(&Chromosome<G>, f64, &[f64])> {
        if self.is_empty() {
            return None;
        }
        Some((
            &self.chromosomes[0],
            self.fitness[0],
            self.raw_fitness[0].as_slice(),
        ))
    }

    /// Drops every row that is identical to the immediately preceding kept
    /// row, returning how many rows were removed.
    ///
    /// This is adjacent-duplicate suppression, not full pairwise dedup: it
    /// relies on the fitness sort clustering equal individuals together.
    /// Row 0 is always kept.
    pub fn prune_adjacent_duplicates(&mut self) -> usize {
        if self.len() < 2 {
            return 0;
        }

        let mut keep = vec![true; self.len()];
        let mut prev = 0;
        for i in 1..self.len() {
            if self.chromosomes[i] == self.chromosomes[prev] {
                keep[i] = false;
            } else {
                prev = i;
            }
        }

        let before = self.len();
        let chromosomes = std::mem::take(&mut self.chromosomes);
        self.chromosomes = chromosomes
            .into_iter()
            .zip(&keep)
            .filter_map(|(row, &kept)| kept.then_some(row))
            .collect();
        let fitness = std::mem::take(&mut self.fitness);
        self.fitness = fitness
            .into_iter()
            .zip(&keep)
            .filter_map(|(f, &kept)| kept.then_some(f))
            .collect();
        let raw_fitness = std::mem::take(&mut self.raw_fitness);
        self.raw_fitness = raw_fitness
            .into_iter()
            .zip(&keep)
            .filter_map(|(raw, &kept)| kept.then_some(raw))
            .collect();

        before - self.len()
    }

    /// Appends refill rows with unevaluated scores.
    pub fn extend_rows(&mut self, chromosomes: Vec<Chromosome<G>>) {
        for chromosome in chromosomes {
            self.chromosomes.push(chromosome);
            self.fitness.push(UNEVALUATED);
            self.raw_fitness.push(Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(rows: &[(&[i32], f64)]) -> Population<i32> {
        let mut pop = Population::from_chromosomes(
            rows.iter()
                .map(|(genes, _)| Chromosome::new(genes.to_vec()))
                .collect(),
        );
        let fitness: Vec<f64> = rows.iter().map(|&(_, f)| f).collect();
        let raw: Vec<Vec<f64>> = fitness.iter().map(|&f| vec![f]).collect();
        pop.set_scores(fitness, raw).unwrap();
        pop
    }

    #[test]
    fn test_sort_descending_and_pairing() {
        let mut pop = population(&[
            (&[1, 1], 0.3),
            (&[2, 2], 0.9),
            (&[3, 3], 0.5),
        ]);
        pop.sort_by_fitness();

        assert_eq!(pop.fitness(), &[0.9, 0.5, 0.3]);
        assert_eq!(pop.row(0).genes(), &[2, 2]);
        assert_eq!(pop.row(1).genes(), &[3, 3]);
        assert_eq!(pop.row(2).genes(), &[1, 1]);
        // raw scores moved with their rows
        assert_eq!(pop.raw_fitness()[0], vec![0.9]);
        assert_eq!(pop.raw_fitness()[2], vec![0.3]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut pop = population(&[
            (&[1, 0], 0.5),
            (&[2, 0], 0.5),
            (&[3, 0], 0.9),
            (&[4, 0], 0.1),
        ]);
        pop.sort_by_fitness();
        let first: Vec<Vec<i32>> = pop.chromosomes().iter().map(|c| c.genes().to_vec()).collect();
        pop.sort_by_fitness();
        let second: Vec<Vec<i32>> = pop.chromosomes().iter().map(|c| c.genes().to_vec()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_orders_nan_last() {
        let mut pop = population(&[
            (&[1], f64::NAN),
            (&[2], 0.2),
            (&[3], 0.7),
        ]);
        pop.sort_by_fitness();
        assert_eq!(pop.fitness()[0], 0.7);
        assert_eq!(pop.fitness()[1], 0.2);
        assert!(pop.fitness()[2].is_nan());
    }

    #[test]
    fn test_prune_adjacent_duplicates() {
        let mut pop = population(&[
            (&[5, 5], 0.9),
            (&[5, 5], 0.9),
            (&[5, 5], 0.9),
            (&[1, 2], 0.4),
        ]);
        let removed = pop.prune_adjacent_duplicates();
        assert_eq!(removed, 2);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.row(0).genes(), &[5, 5]);
        assert_eq!(pop.row(1).genes(), &[1, 2]);
        assert_eq!(pop.fitness().len(), 2);
        assert_eq!(pop.raw_fitness().len(), 2);
    }

    #[test]
    fn test_prune_only_catches_adjacent_rows() {
        let mut pop = population(&[
            (&[5, 5], 0.9),
            (&[1, 2], 0.4),
            (&[5, 5], 0.2),
        ]);
        assert_eq!(pop.prune_adjacent_duplicates(), 0);
        assert_eq!(pop.len(), 3);
    }

    #[test]
    fn test_extend_rows_keeps_arrays_aligned() {
        let mut pop = population(&[(&[1, 1], 0.5)]);
        pop.extend_rows(vec![Chromosome::new(vec![2, 2]), Chromosome::new(vec![3, 3])]);
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.fitness().len(), 3);
        assert_eq!(pop.raw_fitness().len(), 3);
        assert!(pop.fitness()[1].is_nan());
    }

    #[test]
    fn test_tail_scores_carry_row_zero() {
        let mut pop = population(&[(&[1], 0.9), (&[2], 0.1), (&[3], 0.2)]);
        pop.set_tail_scores(vec![0.4, 0.6], vec![vec![0.4], vec![0.6]])
            .unwrap();
        assert_eq!(pop.fitness(), &[0.9, 0.4, 0.6]);
    }

    #[test]
    fn test_mean_fitness() {
        let pop = population(&[(&[1], 1.0), (&[2], 2.0), (&[3], 6.0)]);
        assert!((pop.mean_fitness() - 3.0).abs() < 1e-12);
    }
}
