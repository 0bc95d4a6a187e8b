// src/report.rs

//! Plain-text report of a run: platform, workflow totals, estimates.

use std::fmt::{self, Write};

use crate::dag::WorkflowSummary;
use crate::estimate::{ClusterSpec, MakespanEstimates};
use crate::types::BatchTime;

const GFLOP: f64 = 1e9;
const TFLOP: f64 = 1e12;
const GBYTE: f64 = 1e9;
const HOUR: f64 = 3600.0;

/// Render the report. `summary.total_work` is expected in flops.
pub fn render(
    summary: &WorkflowSummary,
    cluster: &ClusterSpec,
    estimates: &MakespanEstimates,
    batch_time: BatchTime,
) -> String {
    let mut out = String::new();
    // Writing into a String only fails if a Display impl does.
    if let Err(err) = write_report(&mut out, summary, cluster, estimates, batch_time) {
        tracing::warn!(%err, "report rendering stopped early");
    }
    out
}

/// Write the report into any formatter sink.
pub fn write_report(
    out: &mut impl Write,
    summary: &WorkflowSummary,
    cluster: &ClusterSpec,
    estimates: &MakespanEstimates,
    batch_time: BatchTime,
) -> fmt::Result {
    writeln!(out, "PLATFORM:")?;
    writeln!(
        out,
        "  - {} {}-core nodes",
        cluster.num_nodes, cluster.cores_per_node
    )?;
    writeln!(out, "  - core flop rate: {:.2} Gflop/sec", cluster.core_speed / GFLOP)?;
    writeln!(
        out,
        "  - per-node I/O read rate: {:.2} GB/sec",
        cluster.io_read_bw_per_node / GBYTE
    )?;
    writeln!(
        out,
        "  - per-node I/O write rate: {:.2} GB/sec",
        cluster.io_write_bw_per_node / GBYTE
    )?;

    writeln!(out, "\nWORKFLOW:")?;
    writeln!(
        out,
        "  - {} tasks, {} files, {} dependencies, {} levels",
        summary.task_count, summary.file_count, summary.edge_count, summary.level_count
    )?;
    writeln!(out, "  - TOTAL WORK:         {:.2} Tflop", summary.total_work / TFLOP)?;
    writeln!(out, "  - TOTAL DATA READ:    {:.2} GB", summary.total_read_bytes / GBYTE)?;
    writeln!(out, "  - TOTAL DATA WRITTEN: {:.2} GB", summary.total_write_bytes / GBYTE)?;

    writeln!(out, "\nNAIVE / NO CONCURRENCY: {:.2} hours", estimates.no_overlap / HOUR)?;
    writeln!(out, "NAIVE / CONCURRENCY   : {:.2} hours", estimates.overlap / HOUR)?;
    writeln!(
        out,
        "CRITICAL PATH ({batch_time}) : {:.2} hours",
        estimates.level_batched / HOUR
    )?;

    Ok(())
}
