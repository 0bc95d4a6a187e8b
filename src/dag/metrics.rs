// src/dag/metrics.rs

//! Aggregate queries over a workflow.
//!
//! Data volumes are counted per (task, file role): a file read by three
//! tasks contributes its size three times to the read total. Byte totals are
//! accumulated as `f64`, so very large sizes lose precision but never
//! overflow.

use crate::dag::graph::WorkflowGraph;

/// Sum of every task's cost.
pub fn total_work(graph: &WorkflowGraph) -> f64 {
    graph.tasks().map(|t| t.cost).sum()
}

/// Sum of input file sizes over all tasks.
pub fn total_read_bytes(graph: &WorkflowGraph) -> f64 {
    graph
        .tasks()
        .flat_map(|t| graph.input_files(t))
        .map(|f| f.size)
        .sum()
}

/// Sum of output file sizes over all tasks.
pub fn total_write_bytes(graph: &WorkflowGraph) -> f64 {
    graph
        .tasks()
        .flat_map(|t| graph.output_files(t))
        .map(|f| f.size)
        .sum()
}

/// Totals and shape of a built workflow, as consumed by reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowSummary {
    pub task_count: usize,
    pub file_count: usize,
    pub edge_count: usize,
    pub level_count: usize,
    pub total_work: f64,
    pub total_read_bytes: f64,
    pub total_write_bytes: f64,
}

impl WorkflowSummary {
    pub fn of(graph: &WorkflowGraph) -> Self {
        Self {
            task_count: graph.task_count(),
            file_count: graph.file_count(),
            edge_count: graph.edge_count(),
            level_count: graph.level_count(),
            total_work: total_work(graph),
            total_read_bytes: total_read_bytes(graph),
            total_write_bytes: total_write_bytes(graph),
        }
    }
}
