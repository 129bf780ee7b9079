//! Core simulation algorithms
//!
//! Dissolution calibration runs once at model-setup time; distribution
//! profiling, entrant assignment, and attribute sync run once per
//! simulation step.

pub mod dissolution;
pub mod distribution;
pub mod entrants;
pub mod sync;

pub use dissolution::{
    DissolutionCoefficients, DissolutionSpec, ModelForm, Stratifier, StratifierKind, calibrate,
};
pub use distribution::{DistributionSet, ValueDistribution, attribute_distributions};
pub use entrants::assign_entrant_attributes;
pub use sync::{copy_attributes_in, copy_attributes_out};
