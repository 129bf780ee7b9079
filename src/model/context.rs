//! Per-replicate simulation context
//!
//! One explicit mutable context object owns the authoritative attribute
//! table, the run configuration, and the replicate's scratch state. The
//! sync and entrant operations are its only legitimate mutators; passing
//! it by exclusive reference replaces the original design's global bag of
//! loose fields.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::algorithm::distribution::{DistributionSet, attribute_distributions};
use crate::config::{RunConfig, RunParams};
use crate::model::attributes::{AttrValue, AttributeTable};

/// Scratch state cached between operations within one replicate
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    /// Attribute names referenced by the network's structural model terms,
    /// cached at the last copy-in
    pub model_terms: Option<Vec<String>>,
    /// Attribute distributions captured at initialization time
    pub init_distributions: Option<DistributionSet>,
    /// Distinct stratifier values observed at the last copy-in, for
    /// by-group reporting
    pub stratifier_values: Vec<AttrValue>,
}

/// Mutable state owned by one simulation replicate
#[derive(Debug)]
pub struct SimContext {
    /// Authoritative attribute table
    pub attrs: AttributeTable,
    /// Scalar run parameters
    pub params: RunParams,
    /// Run-time control configuration
    pub config: RunConfig,
    /// Cached state between operations
    pub scratch: Scratch,
    /// Seeded random source for reproducible entrant sampling
    pub rng: StdRng,
}

impl SimContext {
    /// Create a context with an empty attribute table, seeding the random
    /// source from the configuration
    #[must_use]
    pub fn new(params: RunParams, config: RunConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            attrs: AttributeTable::new(0),
            params,
            config,
            scratch: Scratch::default(),
            rng,
        }
    }

    /// Derive a context for replicate `index`, offsetting the base seed so
    /// replicates draw independent but reproducible streams
    ///
    /// The derived seed replaces the base seed in the stored configuration
    /// so the context records the seed it actually runs with.
    #[must_use]
    pub fn for_replicate(params: RunParams, mut config: RunConfig, index: u64) -> Self {
        config.seed = config.seed.wrapping_add(index);
        Self::new(params, config)
    }

    /// Capture the initialization-time attribute distributions
    ///
    /// Call once after the initial copy-in, before the first simulation
    /// step; entrant rules naming the initialization distribution resolve
    /// against this snapshot.
    pub fn snapshot_init_distributions(&mut self) {
        self.scratch.init_distributions = Some(attribute_distributions(&self.attrs));
    }
}
