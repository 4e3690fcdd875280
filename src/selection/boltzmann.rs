//! Boltzmann selection: a fitness-driven probability table recomputed every
//! generation under a rising temperature.
//!
//! The temperature starts at 100 and grows 10% per generation, so selection
//! becomes *less* selective as the run progresses. This reverse annealing
//! widens selection diversity late in a run and is intentional.

/// Starting temperature for a fresh run.
pub(crate) const INITIAL_TEMPERATURE: f64 = 100.0;

/// Guard added to the min-max-scaled fitness before inversion, so the worst
/// elite row (scaled to 0) stays finite.
const SCALE_EPSILON: f64 = 1e-6;

/// Builds the cumulative probability table over the kept elite.
///
/// Elite fitness is min-max scaled, inverted through
/// `1 / (scaled + epsilon)` and weighted by `exp(-inverted / temperature)`,
/// so the fittest row carries the most mass. Degenerate weight sets (an
/// all-equal elite, or underflow to zero everywhere) fall back to a uniform
/// table; a genuinely converged population therefore selects uniformly.
pub(crate) fn boltzmann_intervals(elite_fitness: &[f64], temperature: f64) -> Vec<f64> {
    let n = elite_fitness.len();
    let min = elite_fitness.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = elite_fitness
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let mut weights: Vec<f64> = if range.is_finite() && range > 0.0 {
        elite_fitness
            .iter()
            .map(|&f| {
                let scaled = (f - min) / range;
                (-1.0 / ((scaled + SCALE_EPSILON) * temperature)).exp()
            })
            .collect()
    } else {
        vec![1.0; n]
    };

    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        weights = vec![1.0; n];
    }
    let sum: f64 = weights.iter().sum();

    let mut intervals = Vec::with_capacity(n + 1);
    intervals.push(0.0);
    let mut cumulative = 0.0;
    for weight in &weights {
        cumulative += weight / sum;
        intervals.push(cumulative);
    }
    intervals
}
