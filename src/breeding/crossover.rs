//! Multi-point crossover over the allowed gene set.

use crate::chromosome::Chromosome;
use crate::rng::RandomNumberGenerator;

/// Which parent contributes the first segment of the offspring.
///
/// Building both slots from the same parent pair and crossover points
/// yields the two complementary offspring of one mating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffspringSlot {
    /// `parent_a` leads.
    First,
    /// `parent_b` leads.
    Second,
}

/// Draws `n_points` distinct crossover points from the allowed gene set,
/// sorted ascending.
pub fn crossover_points(
    allowed_genes: &[usize],
    n_points: usize,
    rng: &mut RandomNumberGenerator,
) -> Vec<usize> {
    let picks = rng.sample_distinct(allowed_genes.len(), n_points);
    let mut points: Vec<usize> = picks.into_iter().map(|i| allowed_genes[i]).collect();
    points.sort_unstable();
    points
}

/// Builds one offspring by alternating parent gene segments at each
/// crossover point.
///
/// Gene `i` switches source parent at every point equal to `i`, so a point
/// `p` splits the chromosome into `[0, p)` from one parent and `[p, ...)`
/// from the other (until the next point). Offspring length always equals
/// chromosome length.
pub fn create_offspring<G: Clone>(
    parent_a: &Chromosome<G>,
    parent_b: &Chromosome<G>,
    points: &[usize],
    slot: OffspringSlot,
) -> Chromosome<G> {
    let mut from_a = matches!(slot, OffspringSlot::First);
    let mut boundaries = points.iter().peekable();
    let mut genes = Vec::with_capacity(parent_a.len());

    for i in 0..parent_a.len() {
        if let Some(&&point) = boundaries.peek() {
            if point == i {
                from_a = !from_a;
                boundaries.next();
            }
        }
        let gene = if from_a {
            parent_a.gene(i)
        } else {
            parent_b.gene(i)
        };
        genes.push(gene.clone());
    }

    Chromosome::new(genes)
}
