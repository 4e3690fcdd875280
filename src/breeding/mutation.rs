//! Point mutation over the allowed gene set.

use tracing::trace;

use crate::chromosome::GeneSpace;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Applies `n_mutations` single-gene mutation events to the population.
///
/// Each event draws a row index from `[1, pop_size)` (row 0, the incumbent
/// best, is protected) and a gene index from the allowed, non-excluded
/// set, both with replacement, and overwrites that one cell with a fresh
/// value from the gene space. Events may collide on a cell; the last write
/// wins.
pub fn mutate_population<Sp>(
    population: &mut Population<Sp::Gene>,
    n_mutations: usize,
    allowed_genes: &[usize],
    space: &Sp,
    rng: &mut RandomNumberGenerator,
) where
    Sp: GeneSpace,
{
    if population.len() < 2 || allowed_genes.is_empty() {
        return;
    }

    trace!(n_mutations, "applying mutation events");
    for _ in 0..n_mutations {
        let row = 1 + rng.gen_index(population.len() - 1);
        let column = allowed_genes[rng.gen_index(allowed_genes.len())];
        let gene = space.random_gene(column, rng);
        population.row_mut(row).set_gene(column, gene);
    }
}
