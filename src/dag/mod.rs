// src/dag/mod.rs

//! Workflow DAG representation and derived views.
//!
//! - [`graph`] holds tasks, files and control dependencies.
//! - [`task`] defines the task and file entities.
//! - [`levels`] assigns topological levels.
//! - [`metrics`] provides the aggregate work / data volume queries.

pub mod graph;
pub mod levels;
pub mod metrics;
pub mod task;

pub use graph::{EdgeInsertion, WorkflowGraph};
pub use metrics::{WorkflowSummary, total_read_bytes, total_work, total_write_bytes};
pub use task::{DataFile, FileId, Task, TaskMetadata};
