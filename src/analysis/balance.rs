//! Degree-distribution balance check for two-group populations
//!
//! In a two-group population every cross-group partnership contributes one
//! endpoint to each group, so the edge counts implied by the two groups'
//! degree distributions must agree for the target network to exist.

use std::fmt;

/// Tolerance for a fractional degree distribution summing to one
const DISTRIBUTION_TOLERANCE: f64 = 1e-3;

/// Maximum tolerated absolute difference between implied edge counts
const EDGE_TOLERANCE: f64 = 1.0;

/// Result of checking two groups' degree distributions against each other
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceCheck {
    /// Edges implied by group 1's distribution
    pub edges_g1: f64,
    /// Edges implied by group 2's distribution
    pub edges_g2: f64,
    /// Sum of group 1's distribution fractions
    pub total_g1: f64,
    /// Sum of group 2's distribution fractions
    pub total_g2: f64,
}

impl BalanceCheck {
    /// Whether group 1's fractions sum to one within tolerance
    #[must_use]
    pub fn g1_proper(&self) -> bool {
        (self.total_g1 - 1.0).abs() <= DISTRIBUTION_TOLERANCE
    }

    /// Whether group 2's fractions sum to one within tolerance
    #[must_use]
    pub fn g2_proper(&self) -> bool {
        (self.total_g2 - 1.0).abs() <= DISTRIBUTION_TOLERANCE
    }

    /// Whether the implied edge counts agree within tolerance
    #[must_use]
    pub fn edges_agree(&self) -> bool {
        (self.edges_g1 - self.edges_g2).abs() <= EDGE_TOLERANCE
    }

    /// Whether both distributions are proper and the edge counts agree
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.g1_proper() && self.g2_proper() && self.edges_agree()
    }
}

impl fmt::Display for BalanceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Degree Distribution Balance Check:")?;
        writeln!(
            f,
            "  Group 1: implied edges = {:.1}, fraction total = {:.4}{}",
            self.edges_g1,
            self.total_g1,
            if self.g1_proper() { "" } else { "  ** not a proper distribution" }
        )?;
        writeln!(
            f,
            "  Group 2: implied edges = {:.1}, fraction total = {:.4}{}",
            self.edges_g2,
            self.total_g2,
            if self.g2_proper() { "" } else { "  ** not a proper distribution" }
        )?;
        if self.is_balanced() {
            writeln!(f, "  Balanced.")?;
        } else if !self.edges_agree() {
            writeln!(
                f,
                "  ** imbalance: |{:.1} - {:.1}| > {EDGE_TOLERANCE}",
                self.edges_g1, self.edges_g2
            )?;
        }
        Ok(())
    }
}

/// Check whether two groups' fractional degree distributions imply
/// matching edge counts
///
/// Each distribution is indexed by degree `0..=g`; implied edges per group
/// are `sum(fraction_k * size * k)`. Read-only; never fails.
#[must_use]
pub fn check_degree_balance(
    size_g1: usize,
    dist_g1: &[f64],
    size_g2: usize,
    dist_g2: &[f64],
) -> BalanceCheck {
    BalanceCheck {
        edges_g1: implied_edges(size_g1, dist_g1),
        edges_g2: implied_edges(size_g2, dist_g2),
        total_g1: dist_g1.iter().sum(),
        total_g2: dist_g2.iter().sum(),
    }
}

fn implied_edges(size: usize, dist: &[f64]) -> f64 {
    dist.iter()
        .enumerate()
        .map(|(degree, fraction)| fraction * size as f64 * degree as f64)
        .sum()
}
