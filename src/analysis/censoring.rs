//! Edge-censoring table
//!
//! Partitions a timed edge list by whether each edge's onset and terminus
//! fall inside the observation window, and renders the operator-facing
//! table of counts and percentages.

use std::fmt;

use crate::model::edge::TimedEdge;

/// Censoring breakdown over a timed edge list
///
/// The four cells are exclusive; the left/right accessors report the
/// marginal totals (all onset-censored edges, all terminus-censored
/// edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CensoringTable {
    /// Onset censored, terminus observed
    pub onset_only: usize,
    /// Terminus censored, onset observed
    pub terminus_only: usize,
    /// Both onset and terminus censored
    pub both: usize,
    /// Fully observed
    pub neither: usize,
}

impl CensoringTable {
    /// Tally a timed edge list
    #[must_use]
    pub fn from_edges(edges: &[TimedEdge]) -> Self {
        let mut table = Self::default();
        for edge in edges {
            match (edge.onset_censored, edge.terminus_censored) {
                (true, false) => table.onset_only += 1,
                (false, true) => table.terminus_only += 1,
                (true, true) => table.both += 1,
                (false, false) => table.neither += 1,
            }
        }
        table
    }

    /// Total number of edges tallied
    #[must_use]
    pub fn total(&self) -> usize {
        self.onset_only + self.terminus_only + self.both + self.neither
    }

    /// All onset-censored edges (marginal)
    #[must_use]
    pub fn left(&self) -> usize {
        self.onset_only + self.both
    }

    /// All terminus-censored edges (marginal)
    #[must_use]
    pub fn right(&self) -> usize {
        self.terminus_only + self.both
    }

    /// Percentage of the total, zero for an empty table
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64 * 100.0
        }
    }
}

impl fmt::Display for CensoringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Edge Censoring Table ({} edges):", self.total())?;
        let rows = [
            ("Onset censored (left)", self.left()),
            ("Terminus censored (right)", self.right()),
            ("Both censored", self.both),
            ("Neither censored", self.neither),
        ];
        for (label, count) in rows {
            writeln!(f, "  {label:<26} {count:>6} ({:>5.1}%)", self.percent(count))?;
        }
        Ok(())
    }
}
