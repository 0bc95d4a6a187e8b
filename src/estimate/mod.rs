// src/estimate/mod.rs

//! Makespan estimators.
//!
//! - [`naive`]: No-Overlap and Overlap, from aggregate totals only.
//! - [`level_batched`]: level-by-level batching with I/O contention.
//!
//! All estimators only read the graph, so one graph may be shared by
//! several estimator calls (including across threads).

pub mod cluster;
pub mod level_batched;
pub mod naive;

pub use cluster::ClusterSpec;
pub use level_batched::{level_batched, task_duration};
pub use naive::{PhaseTimes, no_overlap, overlap};

use crate::dag::WorkflowGraph;
use crate::types::BatchTime;

/// The three scalar estimates, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakespanEstimates {
    pub no_overlap: f64,
    pub overlap: f64,
    pub level_batched: f64,
}

/// Run every estimator on the same graph.
///
/// The level-batched estimator reads task cost as seconds, so `graph` must
/// have been built with the core speed folded into its cost scale
/// (`cost_scale_factor / core_speed`). The naive estimators divide by
/// `cluster.core_speed` themselves, so on such a graph `cluster.core_speed`
/// should be 1.0 for their compute phase to match. For a flop-scaled
/// graph use [`estimate_document`](crate::estimate_document), which builds
/// one graph of each kind.
pub fn estimate_all(
    graph: &WorkflowGraph,
    cluster: &ClusterSpec,
    batch_time: BatchTime,
) -> MakespanEstimates {
    MakespanEstimates {
        no_overlap: no_overlap(graph, cluster),
        overlap: overlap(graph, cluster),
        level_batched: level_batched(graph, cluster, batch_time),
    }
}
