//! Data model for the simulation core
//!
//! Columnar attribute storage, partnership edges with temporal metadata,
//! the structural-network abstraction, and the per-replicate context.

pub mod attributes;
pub mod context;
pub mod edge;
pub mod network;

pub use attributes::{
    AttrValue, AttributeColumn, AttributeTable, RESERVED_FIELDS, SPECIAL_FIELDS, is_reserved,
    is_special,
};
pub use context::{Scratch, SimContext};
pub use edge::{Edge, TimedEdge};
pub use network::{MemoryNetwork, StructuralNetwork};
