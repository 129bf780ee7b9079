//! Partnership edges and their temporal metadata

use serde::{Deserialize, Serialize};

/// An unordered pair of member identities forming a partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub head: usize,
    /// Second endpoint
    pub tail: usize,
}

impl Edge {
    /// Create an edge between two members
    #[must_use]
    pub fn new(head: usize, tail: usize) -> Self {
        Self { head, tail }
    }
}

/// A partnership with onset/terminus times and censoring flags relative to
/// the observation window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEdge {
    /// First endpoint
    pub head: usize,
    /// Second endpoint
    pub tail: usize,
    /// Time step at which the partnership began
    pub onset: u32,
    /// Time step at which the partnership ended (half-open; equal to onset
    /// for a single-instant partnership)
    pub terminus: u32,
    /// True onset lies before the observation window
    pub onset_censored: bool,
    /// True terminus lies beyond the observation window
    pub terminus_censored: bool,
}

impl TimedEdge {
    /// Create an uncensored timed edge
    #[must_use]
    pub fn new(head: usize, tail: usize, onset: u32, terminus: u32) -> Self {
        Self {
            head,
            tail,
            onset,
            terminus,
            onset_censored: false,
            terminus_censored: false,
        }
    }

    /// Set the censoring flags
    #[must_use]
    pub fn censored(mut self, onset_censored: bool, terminus_censored: bool) -> Self {
        self.onset_censored = onset_censored;
        self.terminus_censored = terminus_censored;
        self
    }

    /// Whether the partnership is active at time step `t`
    ///
    /// Activity uses the half-open interval `onset <= t < terminus`; a
    /// single-instant partnership with `onset == terminus` is active at
    /// exactly that instant.
    #[must_use]
    pub fn active_at(&self, t: u32) -> bool {
        (self.onset <= t && t < self.terminus) || (self.onset == self.terminus && self.onset == t)
    }

    /// The structural pair without temporal metadata
    #[must_use]
    pub fn edge(&self) -> Edge {
        Edge::new(self.head, self.tail)
    }
}
