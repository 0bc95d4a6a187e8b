// src/wfcommons/builder.rs

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::dag::graph::{EdgeInsertion, WorkflowGraph};
use crate::dag::levels::assign_levels;
use crate::dag::task::{Task, TaskMetadata};
use crate::errors::{Result, WfError};
use crate::types::FileLink;
use crate::wfcommons::raw::{COMPUTE_TASK_TYPE, CPU_WORK_FLAG, RawTask, RawWorkflowDocument};

/// Options recognized by [`WorkflowBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderOptions {
    /// Multiplier from declared CPU work to the estimator's cost unit
    /// (e.g. flops per unit of CPU work). Use `1.0` if the input already
    /// carries costs directly.
    pub cost_scale_factor: f64,

    /// Keep dependency edges that are already implied by existing paths.
    pub allow_redundant_dependencies: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            cost_scale_factor: 1.0,
            allow_redundant_dependencies: false,
        }
    }
}

/// Counters collected while resolving parent references, for logging.
#[derive(Debug, Default)]
struct LinkStats {
    inserted: usize,
    redundant: usize,
    duplicate: usize,
    unresolved: usize,
}

/// Builds a [`WorkflowGraph`] from WfCommons raw records in two passes:
///
/// 1. create every task and file (first declaration of a file id fixes its
///    size);
/// 2. resolve parent references into edges, skipping unknown or
///    self-referencing parents and applying the redundant-edge policy.
///
/// The graph is leveled before it is returned. Any error aborts the whole
/// build; no partial graph is produced.
#[derive(Debug, Clone, Default)]
pub struct WorkflowBuilder {
    options: BuilderOptions,
}

impl WorkflowBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> BuilderOptions {
        self.options
    }

    /// Read and build a workflow JSON file.
    pub fn build_from_path(&self, path: impl AsRef<Path>) -> Result<WorkflowGraph> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = contents.len(), "read workflow file");
        self.build_from_str(&contents)
    }

    pub fn build_from_str(&self, json: &str) -> Result<WorkflowGraph> {
        let doc = RawWorkflowDocument::from_json_str(json)?;
        self.build(&doc)
    }

    pub fn build(&self, doc: &RawWorkflowDocument) -> Result<WorkflowGraph> {
        let records = &doc.workflow()?.tasks;
        let mut graph = WorkflowGraph::new();

        for record in records {
            self.add_task_record(&mut graph, record)?;
        }

        let mut stats = LinkStats::default();
        for record in records {
            self.link_parents(&mut graph, record, &mut stats)?;
        }

        let levels = assign_levels(&mut graph)?;

        info!(
            tasks = graph.task_count(),
            files = graph.file_count(),
            edges = stats.inserted,
            redundant_dropped = stats.redundant,
            duplicate_edges = stats.duplicate,
            unresolved_parents = stats.unresolved,
            levels,
            "workflow graph built"
        );

        Ok(graph)
    }

    /// Pass 1 for a single record: the task and its files.
    fn add_task_record(&self, graph: &mut WorkflowGraph, record: &RawTask) -> Result<()> {
        if record.kind != COMPUTE_TASK_TYPE {
            return Err(WfError::UnsupportedTaskType {
                task: record.name.clone(),
                kind: record.kind.clone(),
            });
        }

        let cpu_work = record.command.cpu_work().ok_or_else(|| {
            WfError::FormatError(format!(
                "task '{}' has no numeric {} argument",
                record.name, CPU_WORK_FLAG
            ))
        })?;

        let mut task = Task::new(record.name.clone(), cpu_work * self.options.cost_scale_factor);
        task.metadata = task_metadata(record);
        graph.add_task(task)?;

        for decl in &record.files {
            if !decl.size.is_finite() || decl.size < 0.0 {
                return Err(WfError::FormatError(format!(
                    "file '{}' of task '{}' has invalid size {}",
                    decl.name, record.name, decl.size
                )));
            }

            let file = match graph.file_id(&decl.name) {
                Ok(existing) => {
                    let known = graph.file_at(existing).size;
                    if known != decl.size {
                        debug!(
                            file = %decl.name,
                            task = %record.name,
                            kept = known,
                            ignored = decl.size,
                            "file size mismatch; keeping first declaration"
                        );
                    }
                    existing
                }
                Err(WfError::FileNotFound(_)) => graph.add_file(decl.name.clone(), decl.size),
                Err(e) => return Err(e),
            };

            let task = graph.task_mut(&record.name)?;
            match decl.link {
                FileLink::Input => task.add_input(file),
                FileLink::Output => task.add_output(file),
                FileLink::Other => {
                    debug!(file = %decl.name, task = %record.name, "ignoring file with unrecognized link");
                }
            }
        }

        Ok(())
    }

    /// Pass 2 for a single record: dependency edges from its parents.
    fn link_parents(
        &self,
        graph: &mut WorkflowGraph,
        record: &RawTask,
        stats: &mut LinkStats,
    ) -> Result<()> {
        let allow_redundant = self.options.allow_redundant_dependencies;

        for parent in &record.parents {
            match graph.add_dependency(parent, &record.name, allow_redundant) {
                Ok(EdgeInsertion::Inserted) => stats.inserted += 1,
                Ok(EdgeInsertion::Redundant) => {
                    stats.redundant += 1;
                    debug!(parent = %parent, child = %record.name, "dropping redundant dependency");
                }
                Ok(EdgeInsertion::Duplicate) => stats.duplicate += 1,
                Ok(EdgeInsertion::SelfReference) => {
                    stats.unresolved += 1;
                    debug!(task = %record.name, "skipping self-referencing parent");
                }
                Err(WfError::TaskNotFound(_)) => {
                    stats.unresolved += 1;
                    debug!(parent = %parent, child = %record.name, "skipping unknown parent");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

/// Coerce the optional metadata fields. Numbers of the wrong kind are
/// converted (fractions truncated); anything else is dropped.
fn task_metadata(record: &RawTask) -> TaskMetadata {
    TaskMetadata {
        priority: metadata_field(record, "priority", &record.priority, as_integer),
        avg_cpu: metadata_field(record, "avgCPU", &record.avg_cpu, as_finite),
        bytes_read: metadata_field(record, "bytesRead", &record.bytes_read, as_byte_count),
        bytes_written: metadata_field(
            record,
            "bytesWritten",
            &record.bytes_written,
            as_byte_count,
        ),
    }
}

fn metadata_field<T>(
    record: &RawTask,
    field: &str,
    value: &Option<Value>,
    coerce: fn(&Value) -> Option<T>,
) -> Option<T> {
    let raw = value.as_ref()?;
    let coerced = coerce(raw);
    if coerced.is_none() {
        debug!(task = %record.name, field, value = %raw, "ignoring unusable metadata value");
    }
    coerced
}

fn as_finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| as_finite(value).map(|v| v as i64))
}

fn as_byte_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| as_finite(value).filter(|v| *v >= 0.0).map(|v| v as u64))
}
