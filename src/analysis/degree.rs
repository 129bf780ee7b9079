//! Degree counting over an edge list

use log::warn;

use crate::error::{PartnetError, Result};
use crate::model::edge::Edge;
use crate::model::network::StructuralNetwork;

/// Count edge endpoints per member
///
/// Returns a sequence of length `n` where entry `k` is the number of edge
/// endpoints equal to member `k`; both endpoints of every edge are
/// counted. `MissingSize` when the member count cannot be determined.
pub fn degree_counts(edges: &[Edge], n: Option<usize>) -> Result<Vec<usize>> {
    let n = n.ok_or(PartnetError::MissingSize)?;
    let mut degrees = vec![0usize; n];
    for edge in edges {
        for endpoint in [edge.head, edge.tail] {
            match degrees.get_mut(endpoint) {
                Some(count) => *count += 1,
                None => warn!("edge endpoint {endpoint} outside declared member count {n}"),
            }
        }
    }
    Ok(degrees)
}

/// Degree counts derived from a structural network
pub fn network_degree_counts<N: StructuralNetwork>(net: &N) -> Result<Vec<usize>> {
    degree_counts(&net.edges(), Some(net.active_count()))
}
