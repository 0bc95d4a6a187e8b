// src/dag/levels.rs

//! Topological level assignment.
//!
//! `level(t) = 0` for a task without parents, otherwise
//! `1 + max(level(p))` over its parents. Computed in one pass over a
//! topological order, so every parent is final before its children.

use petgraph::Direction;
use petgraph::algo::toposort;
use tracing::debug;

use crate::dag::graph::WorkflowGraph;
use crate::errors::{Result, WfError};

/// Annotate every task of `graph` with its level.
///
/// Returns the level count. Fails with [`WfError::DagCycle`] if the
/// dependency edges contain a cycle; no levels are written in that case.
pub(crate) fn assign_levels(graph: &mut WorkflowGraph) -> Result<usize> {
    let levels = compute_levels(graph)?;
    graph.set_levels(&levels);

    let count = graph.level_count();
    debug!(levels = count, tasks = graph.task_count(), "workflow leveled");
    Ok(count)
}

fn compute_levels(graph: &WorkflowGraph) -> Result<Vec<usize>> {
    let inner = graph.inner();

    let order = toposort(inner, None).map_err(|cycle| {
        let task = &inner[cycle.node_id()].id;
        WfError::DagCycle(format!(
            "cycle detected in workflow DAG involving task '{}'",
            task
        ))
    })?;

    let mut levels = vec![0usize; inner.node_count()];
    for node in order {
        levels[node.index()] = inner
            .neighbors_directed(node, Direction::Incoming)
            .map(|parent| levels[parent.index()] + 1)
            .max()
            .unwrap_or(0);
    }

    Ok(levels)
}
