//! Tournament selection: 3-way contests drawn with replacement from the
//! offspring-eligible range.

use crate::rng::RandomNumberGenerator;

/// Number of candidates per tournament.
pub(crate) const TOURNAMENT_SIZE: usize = 3;

/// Selects one winner per mating.
///
/// Each tournament draws `TOURNAMENT_SIZE` indices uniformly, with
/// replacement, from `[0, 2 * n_matings)`.
pub(crate) fn select(
    fitness: &[f64],
    n_matings: usize,
    rng: &mut RandomNumberGenerator,
) -> Vec<usize> {
    let range_max = n_matings * 2;
    (0..n_matings)
        .map(|_| {
            let candidates: Vec<usize> = (0..TOURNAMENT_SIZE)
                .map(|_| rng.gen_index(range_max))
                .collect();
            winner(&candidates, fitness)
        })
        .collect()
}

/// The candidate with the highest fitness; ties go to the earliest drawn
/// (lowest-position) candidate, matching a first-maximum argmax.
pub(crate) fn winner(candidates: &[usize], fitness: &[f64]) -> usize {
    let mut best = candidates[0];
    for &index in &candidates[1..] {
        if fitness[index] > fitness[best] {
            best = index;
        }
    }
    best
}
