// src/estimate/level_batched.rs

//! Level-batched critical path estimator.
//!
//! Levels run one after another. Within a level, tasks are ranked
//! longest-first by their uncontended duration and cut into batches of
//! `num_nodes * cores_per_node` tasks. Each batch runs with per-task
//! bandwidth divided by the contention factor `batch_len / num_nodes`.
//!
//! Task cost is read as seconds here.

use tracing::{debug, trace};

use crate::dag::{Task, WorkflowGraph};
use crate::estimate::cluster::ClusterSpec;
use crate::types::BatchTime;

/// Time to read all inputs, run, and write all outputs of `task` at the
/// given effective bandwidths.
pub fn task_duration(graph: &WorkflowGraph, task: &Task, read_bw: f64, write_bw: f64) -> f64 {
    let read: f64 = graph
        .input_files(task)
        .map(|f| f.size / read_bw)
        .sum();
    let write: f64 = graph
        .output_files(task)
        .map(|f| f.size / write_bw)
        .sum();
    read + task.cost + write
}

/// Estimate the makespan with level batching.
pub fn level_batched(graph: &WorkflowGraph, cluster: &ClusterSpec, batch_time: BatchTime) -> f64 {
    let batch_size = cluster.total_cores().max(1);
    let mut total = 0.0;

    for (level, tasks) in group_by_level(graph).into_iter().enumerate() {
        let mut ranked: Vec<(f64, &Task)> = tasks
            .into_iter()
            .map(|t| {
                let d = task_duration(
                    graph,
                    t,
                    cluster.io_read_bw_per_node,
                    cluster.io_write_bw_per_node,
                );
                (d, t)
            })
            .collect();

        // Longest first; ties by id keep the estimate deterministic.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));

        let mut level_time = 0.0;
        for (i, batch) in ranked.chunks(batch_size).enumerate() {
            let t = batch_contribution(graph, cluster, batch, batch_time);
            trace!(level, batch = i, tasks = batch.len(), time = t, "batch estimated");
            level_time += t;
        }

        debug!(level, tasks = ranked.len(), time = level_time, "level estimated");
        total += level_time;
    }

    total
}

fn batch_contribution(
    graph: &WorkflowGraph,
    cluster: &ClusterSpec,
    batch: &[(f64, &Task)],
    batch_time: BatchTime,
) -> f64 {
    let contention = batch.len() as f64 / cluster.num_nodes as f64;
    let read_bw = cluster.io_read_bw_per_node / contention;
    let write_bw = cluster.io_write_bw_per_node / contention;

    let durations = batch
        .iter()
        .map(|(_, t)| task_duration(graph, t, read_bw, write_bw));

    match batch_time {
        BatchTime::Mean => durations.sum::<f64>() / batch.len() as f64,
        BatchTime::Max => durations.fold(0.0, f64::max),
    }
}

fn group_by_level(graph: &WorkflowGraph) -> Vec<Vec<&Task>> {
    let mut levels: Vec<Vec<&Task>> = vec![Vec::new(); graph.level_count()];
    for task in graph.tasks() {
        if let Some(level) = task.level() {
            levels[level].push(task);
        }
    }
    levels
}
