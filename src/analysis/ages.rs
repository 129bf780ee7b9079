//! Mean partnership-age series
//!
//! For each discrete time step in the observed window, the average age of
//! the partnerships active at that step. Ages are counted from one at the
//! onset step.

use itertools::Itertools;

use crate::model::edge::TimedEdge;

/// Mean partnership age at each step of `[min onset, max terminus)`
///
/// A partnership is active at `t` when `onset <= t < terminus`, or at
/// exactly `t` for an instantaneous edge with `onset == terminus == t`.
/// The final boundary instant of the half-open window is dropped. Steps
/// with no active partnership yield `NaN`, which can only occur as a
/// structural boundary artifact of the window.
#[must_use]
pub fn mean_partnership_ages(edges: &[TimedEdge]) -> Vec<(u32, f64)> {
    let Some((start, end)) = edges
        .iter()
        .map(|e| (e.onset, e.terminus))
        .reduce(|(lo, hi), (onset, terminus)| (lo.min(onset), hi.max(terminus)))
    else {
        return Vec::new();
    };

    (start..end)
        .map(|t| {
            let ages: Vec<f64> = edges
                .iter()
                .filter(|e| e.active_at(t))
                .map(|e| f64::from(t - e.onset + 1))
                .collect();
            let mean = if ages.is_empty() {
                f64::NAN
            } else {
                ages.iter().sum::<f64>() / ages.len() as f64
            };
            (t, mean)
        })
        .collect_vec()
}
