//! Structural-network abstraction
//!
//! The formation/dissolution engine owns its own network representation;
//! the simulation core only needs get/set access to per-member attribute
//! vectors, the timed edge list, and the attribute names referenced by the
//! engine's structural model terms. `MemoryNetwork` is the in-crate
//! implementation used by the replicate runner and the test suite.

use rustc_hash::FxHashMap;

use crate::error::{PartnetError, Result};
use crate::model::attributes::AttributeColumn;
use crate::model::edge::{Edge, TimedEdge};

/// Capability surface the external network representation must expose
pub trait StructuralNetwork {
    /// Number of currently active members
    fn active_count(&self) -> usize;

    /// Names of all per-member attributes the network stores
    fn attribute_names(&self) -> Vec<String>;

    /// Read one per-member attribute vector
    fn get_attribute(&self, name: &str) -> Option<AttributeColumn>;

    /// Overwrite one per-member attribute vector
    fn set_attribute(&mut self, name: &str, column: AttributeColumn) -> Result<()>;

    /// Current structural edges
    fn edges(&self) -> Vec<Edge>;

    /// Edges with onset/terminus metadata and censoring flags
    fn timed_edges(&self) -> Vec<TimedEdge>;

    /// Attribute names referenced by the network's structural model terms
    fn model_term_attributes(&self) -> Vec<String>;
}

/// In-memory structural network
#[derive(Debug, Clone, Default)]
pub struct MemoryNetwork {
    n_active: usize,
    attributes: FxHashMap<String, AttributeColumn>,
    edges: Vec<TimedEdge>,
    model_terms: Vec<String>,
}

impl MemoryNetwork {
    /// Create an empty network for `n_active` members
    #[must_use]
    pub fn new(n_active: usize) -> Self {
        Self {
            n_active,
            ..Self::default()
        }
    }

    /// Declare which attribute names the structural model terms reference
    pub fn set_model_terms(&mut self, terms: Vec<String>) {
        self.model_terms = terms;
    }

    /// Update the active-member count
    pub fn set_active_count(&mut self, n_active: usize) {
        self.n_active = n_active;
    }

    /// Add a partnership with temporal metadata
    pub fn add_edge(&mut self, edge: TimedEdge) {
        self.edges.push(edge);
    }

    /// Replace the full edge list
    pub fn set_edges(&mut self, edges: Vec<TimedEdge>) {
        self.edges = edges;
    }
}

impl StructuralNetwork for MemoryNetwork {
    fn active_count(&self) -> usize {
        self.n_active
    }

    fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attributes.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeColumn> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, column: AttributeColumn) -> Result<()> {
        if column.len() != self.n_active {
            return Err(PartnetError::ColumnLengthMismatch {
                attribute: name.to_string(),
                expected: self.n_active,
                found: column.len(),
            });
        }
        self.attributes.insert(name.to_string(), column);
        Ok(())
    }

    fn edges(&self) -> Vec<Edge> {
        self.edges.iter().map(TimedEdge::edge).collect()
    }

    fn timed_edges(&self) -> Vec<TimedEdge> {
        self.edges.clone()
    }

    fn model_term_attributes(&self) -> Vec<String> {
        self.model_terms.clone()
    }
}
