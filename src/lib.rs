//! A Rust library for discrete-time stochastic simulation of dynamic
//! partnership networks: dissolution-model calibration under population
//! turnover, per-member attribute bookkeeping across entrances and exits,
//! and read-only network diagnostics.
//!
//! The formation/dissolution engine itself is external; this crate
//! calibrates its dissolution coefficients at setup time and keeps the
//! authoritative attribute table and the engine's network representation
//! consistent at every simulation step.

pub mod algorithm;
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod runner;

// Re-export the most common types for easier use
// Core types
pub use config::{EntrantRule, RunConfig, RunParams};
pub use error::{PartnetError, Result};
pub use model::{
    AttrValue, AttributeColumn, AttributeTable, Edge, MemoryNetwork, SimContext,
    StructuralNetwork, TimedEdge,
};

// Calibration
pub use algorithm::dissolution::{
    DissolutionCoefficients, DissolutionSpec, ModelForm, Stratifier, StratifierKind, calibrate,
};

// Per-step attribute bookkeeping
pub use algorithm::{
    assign_entrant_attributes, attribute_distributions, copy_attributes_in, copy_attributes_out,
};

// Diagnostics
pub use analysis::{
    BalanceCheck, CensoringTable, check_degree_balance, degree_counts, mean_partnership_ages,
    network_degree_counts,
};

// Replicate execution
pub use runner::{FailurePolicy, ReplicateResult, run_replicates};
