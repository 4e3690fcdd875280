//! Cumulative-probability tables over the kept elite, and the interval
//! lookup that maps a uniform draw to an elite index.

/// Rank-weighted cumulative table for roulette-wheel selection.
///
/// Ranks `1..=pop_keep` are normalized to sum to one and reversed, so rank 1
/// (the best row) carries the highest mass. The returned table has
/// `pop_keep + 1` entries, starts at 0 and ends at 1.
pub(crate) fn rank_weighted_intervals(pop_keep: usize) -> Vec<f64> {
    let total: f64 = (pop_keep * (pop_keep + 1)) as f64 / 2.0;
    let mut intervals = Vec::with_capacity(pop_keep + 1);
    intervals.push(0.0);
    let mut cumulative = 0.0;
    for rank in (1..=pop_keep).rev() {
        cumulative += rank as f64 / total;
        intervals.push(cumulative);
    }
    intervals
}

/// Evenly spaced cumulative table for uniform ("random") selection.
pub(crate) fn uniform_intervals(pop_keep: usize) -> Vec<f64> {
    (0..=pop_keep)
        .map(|i| i as f64 / pop_keep as f64)
        .collect()
}

/// Maps a uniform `[0, 1)` draw to an elite index: the first cumulative
/// bucket the draw does not exceed, minus one, clipped into
/// `[0, pop_keep)`.
pub(crate) fn interval_index(value: f64, intervals: &[f64], pop_keep: usize) -> usize {
    let position = intervals
        .iter()
        .position(|&p| p >= value)
        .unwrap_or(intervals.len());
    position
        .saturating_sub(1)
        .min(pop_keep.saturating_sub(1))
}
