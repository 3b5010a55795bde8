//! Possibility-degree comparison and ranking of intervals.
//!
//! Intervals have no total order. The possibility degree `P(a ≥ b)` gives a
//! probability-like measure in `[0, 1]`; summing it over all rivals turns a
//! set of intervals into a deterministic total order.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Interval;

/// Outcome of comparing two intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalOrdering {
    Greater,
    Less,
    Equal,
    /// Overlapping, indeterminate.
    Overlapping,
}

/// One entry of a possibility-degree ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibilityScore {
    pub name: String,
    pub interval: Interval,
    /// Sum of possibility degrees against every other interval.
    pub score: f64,
}

/// Returns `P(a ≥ b)`.
///
/// Identical intervals give 0.5; a zero denominator never raises and also
/// falls back to 0.5.
pub fn possibility_degree(a: &Interval, b: &Interval) -> f64 {
    if a.lower() == b.lower() && a.upper() == b.upper() {
        return 0.5;
    }
    if a.lower() >= b.upper() {
        return 1.0;
    }
    if a.upper() <= b.lower() {
        return 0.0;
    }
    let denominator = a.width() + b.width();
    if denominator == 0.0 {
        return 0.5;
    }
    ((a.upper() - b.lower()) / denominator).clamp(0.0, 1.0)
}

/// Compares two intervals by possibility degree.
pub fn compare(a: &Interval, b: &Interval) -> IntervalOrdering {
    let forward = possibility_degree(a, b);
    let backward = possibility_degree(b, a);
    if forward == 1.0 {
        IntervalOrdering::Greater
    } else if forward == 0.0 {
        IntervalOrdering::Less
    } else if forward == 0.5 && backward == 0.5 {
        IntervalOrdering::Equal
    } else {
        IntervalOrdering::Overlapping
    }
}

/// Aggregate `Σ_{j≠i} P(i ≥ j)` for each interval, in input order.
pub fn aggregate_scores(intervals: &[Interval]) -> Vec<f64> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, a)| {
            intervals
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, b)| possibility_degree(a, b))
                .sum()
        })
        .collect()
}

/// Best-first index order: highest aggregate first, ties in input order.
pub fn order_descending(intervals: &[Interval]) -> Vec<usize> {
    let scores = aggregate_scores(intervals);
    let mut indices: Vec<usize> = (0..intervals.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Best-first index order for cost-like values: lowest interval first.
pub fn order_ascending(intervals: &[Interval]) -> Vec<usize> {
    // P(i ≤ j) = P(j ≥ i) = 1 - P(i ≥ j), so the smallest aggregate wins.
    let scores = aggregate_scores(intervals);
    let mut indices: Vec<usize> = (0..intervals.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Best-first order by pairwise preference, largest intervals first.
///
/// `a` is preferred to `b` when `P(a ≥ b) > 0.5`, which holds exactly when
/// `a` has the larger midpoint, so the order agrees with midpoint scores.
/// Equal midpoints fall back to the aggregate degree, then input order.
pub fn preference_descending(intervals: &[Interval]) -> Vec<usize> {
    preference_order(intervals, true)
}

/// Best-first order by pairwise preference for cost-like values, smallest first.
pub fn preference_ascending(intervals: &[Interval]) -> Vec<usize> {
    preference_order(intervals, false)
}

fn preference_order(intervals: &[Interval], descending: bool) -> Vec<usize> {
    let midpoints: Vec<f64> = intervals.iter().map(Interval::midpoint).collect();
    let scores = aggregate_scores(intervals);
    let mut indices: Vec<usize> = (0..intervals.len()).collect();
    indices.sort_by(|&a, &b| {
        let ord = midpoints[a]
            .total_cmp(&midpoints[b])
            .then_with(|| scores[a].total_cmp(&scores[b]));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    indices
}

/// Ranks named intervals by aggregate possibility degree, highest first.
pub fn rank(intervals: &[(String, Interval)]) -> Vec<PossibilityScore> {
    let values: Vec<Interval> = intervals.iter().map(|(_, i)| *i).collect();
    let scores = aggregate_scores(&values);
    order_descending(&values)
        .into_iter()
        .map(|idx| PossibilityScore {
            name: intervals[idx].0.clone(),
            interval: intervals[idx].1,
            score: scores[idx],
        })
        .collect()
}

/// Ranks named intervals for cost-like values, lowest first.
///
/// Each score is `Σ_{j≠i} P(j ≥ i)`, so higher still means better.
pub fn rank_ascending(intervals: &[(String, Interval)]) -> Vec<PossibilityScore> {
    let values: Vec<Interval> = intervals.iter().map(|(_, i)| *i).collect();
    let others = values.len().saturating_sub(1) as f64;
    let scores = aggregate_scores(&values);
    order_ascending(&values)
        .into_iter()
        .map(|idx| PossibilityScore {
            name: intervals[idx].0.clone(),
            interval: intervals[idx].1,
            score: others - scores[idx],
        })
        .collect()
}
