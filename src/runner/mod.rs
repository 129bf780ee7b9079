//! Multi-replicate execution
//!
//! Each replicate owns an independent context and network pair and runs
//! purely sequentially; replicates themselves are independent and run on
//! the rayon pool. Per-replicate seeds are derived from the base seed so
//! a fixed configuration reproduces the full set of streams.

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use crate::config::{RunConfig, RunParams};
use crate::error::Result;
use crate::model::context::SimContext;
use crate::model::network::MemoryNetwork;

/// How the driver responds to a replicate failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failed replicate (calibration and
    /// sync failures)
    AbortRun,
    /// Drop failed replicates and keep the rest (diagnostic-class
    /// failures, which should not occur on well-formed input)
    DiscardReplicate,
}

/// Completed replicate: its final context and network state
#[derive(Debug)]
pub struct ReplicateResult {
    /// Zero-based replicate index
    pub index: usize,
    /// Final simulation context
    pub ctx: SimContext,
    /// Final network state
    pub net: MemoryNetwork,
}

/// Run `n_reps` independent replicates of `replicate_fn`
///
/// The closure receives a fresh context (seeded with
/// `config.seed.wrapping_add(index)`) and an empty network, and drives the
/// replicate end to end: setup, per-step copy-in, entrant assignment,
/// copy-out. Results come back ordered by replicate index.
pub fn run_replicates<F>(
    params: &RunParams,
    config: &RunConfig,
    n_reps: usize,
    policy: FailurePolicy,
    replicate_fn: F,
) -> Result<Vec<ReplicateResult>>
where
    F: Fn(&mut SimContext, &mut MemoryNetwork) -> Result<()> + Sync,
{
    info!("running {n_reps} replicate(s) with base seed {}", config.seed);

    let pb = ProgressBar::new(n_reps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} replicates ({per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let outcomes: Vec<(usize, Result<ReplicateResult>)> = (0..n_reps)
        .into_par_iter()
        .map(|index| {
            let mut ctx = SimContext::for_replicate(params.clone(), config.clone(), index as u64);
            let mut net = MemoryNetwork::default();
            let outcome = replicate_fn(&mut ctx, &mut net).map(|()| ReplicateResult {
                index,
                ctx,
                net,
            });
            pb.inc(1);
            (index, outcome)
        })
        .collect();

    pb.finish_and_clear();

    let mut results = Vec::with_capacity(n_reps);
    for (index, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) => match policy {
                FailurePolicy::AbortRun => return Err(err),
                FailurePolicy::DiscardReplicate => {
                    warn!("replicate {index} discarded: {err}");
                }
            },
        }
    }

    info!("{} of {n_reps} replicate(s) completed", results.len());
    Ok(results)
}
