// src/estimate/naive.rs

//! Whole-workflow estimators that ignore the DAG structure.
//!
//! Both use the aggregate totals and the full cluster's bandwidth / compute
//! rate:
//!
//! - `read_time    = total_read_bytes  / (io_read_bw_per_node  * num_nodes)`
//! - `compute_time = total_work        / (num_nodes * cores_per_node * core_speed)`
//! - `write_time   = total_write_bytes / (io_write_bw_per_node * num_nodes)`

use crate::dag::WorkflowGraph;
use crate::dag::metrics::{total_read_bytes, total_work, total_write_bytes};
use crate::estimate::cluster::ClusterSpec;

/// The three phase times shared by the naive estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimes {
    pub read: f64,
    pub compute: f64,
    pub write: f64,
}

impl PhaseTimes {
    pub fn of(graph: &WorkflowGraph, cluster: &ClusterSpec) -> Self {
        let nodes = cluster.num_nodes as f64;
        Self {
            read: total_read_bytes(graph) / (cluster.io_read_bw_per_node * nodes),
            compute: total_work(graph) / (cluster.total_cores() as f64 * cluster.core_speed),
            write: total_write_bytes(graph) / (cluster.io_write_bw_per_node * nodes),
        }
    }
}

/// Reads, then compute, then writes, with no overlap between phases.
pub fn no_overlap(graph: &WorkflowGraph, cluster: &ClusterSpec) -> f64 {
    let t = PhaseTimes::of(graph, cluster);
    t.read + t.compute + t.write
}

/// Compute fully overlapped with I/O: `max(compute, read + write)`.
pub fn overlap(graph: &WorkflowGraph, cluster: &ClusterSpec) -> f64 {
    let t = PhaseTimes::of(graph, cluster);
    t.compute.max(t.read + t.write)
}
