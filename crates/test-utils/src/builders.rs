#![allow(dead_code)]

use serde_json::Value;
use wfmakespan::estimate::ClusterSpec;
use wfmakespan::types::FileLink;
use wfmakespan::wfcommons::{RawCommand, RawFile, RawTask, RawWorkflow, RawWorkflowDocument};

/// Builder for WfCommons documents to simplify test setup.
pub struct WorkflowDocBuilder {
    doc: RawWorkflowDocument,
}

impl WorkflowDocBuilder {
    pub fn new() -> Self {
        Self {
            doc: RawWorkflowDocument {
                name: Some("test-workflow".to_string()),
                workflow: Some(RawWorkflow::default()),
            },
        }
    }

    pub fn with_task(mut self, task: RawTask) -> Self {
        if let Some(wf) = self.doc.workflow.as_mut() {
            wf.tasks.push(task);
        }
        self
    }

    /// Drop the `workflow` container entirely.
    pub fn without_workflow(mut self) -> Self {
        self.doc.workflow = None;
        self
    }

    pub fn build(self) -> RawWorkflowDocument {
        self.doc
    }

    /// Render the document as WfCommons JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.doc).expect("raw workflow documents always serialize")
    }
}

impl Default for WorkflowDocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `RawTask` record of type `compute`.
pub struct TaskRecordBuilder {
    task: RawTask,
}

impl TaskRecordBuilder {
    pub fn new(name: &str, cpu_work: f64) -> Self {
        Self {
            task: RawTask {
                name: name.to_string(),
                kind: "compute".to_string(),
                command: RawCommand {
                    program: Some("wfbench".to_string()),
                    arguments: vec![
                        name.to_string(),
                        "--percent-cpu 1.0".to_string(),
                        format!("--cpu-work {cpu_work}"),
                    ],
                },
                parents: vec![],
                files: vec![],
                priority: None,
                avg_cpu: None,
                bytes_read: None,
                bytes_written: None,
            },
        }
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.task.kind = kind.to_string();
        self
    }

    pub fn arguments(mut self, args: &[&str]) -> Self {
        self.task.command.arguments = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.task.parents.push(parent.to_string());
        self
    }

    pub fn input(self, name: &str, size: impl Into<f64>) -> Self {
        self.file(name, size, FileLink::Input)
    }

    pub fn output(self, name: &str, size: impl Into<f64>) -> Self {
        self.file(name, size, FileLink::Output)
    }

    pub fn file(mut self, name: &str, size: impl Into<f64>, link: FileLink) -> Self {
        self.task.files.push(RawFile {
            name: name.to_string(),
            size: size.into(),
            link,
        });
        self
    }

    /// Metadata setters take any JSON value so tests can feed mistyped input.
    pub fn priority(mut self, priority: impl Into<Value>) -> Self {
        self.task.priority = Some(priority.into());
        self
    }

    pub fn avg_cpu(mut self, avg_cpu: impl Into<Value>) -> Self {
        self.task.avg_cpu = Some(avg_cpu.into());
        self
    }

    pub fn bytes_read(mut self, bytes: impl Into<Value>) -> Self {
        self.task.bytes_read = Some(bytes.into());
        self
    }

    pub fn bytes_written(mut self, bytes: impl Into<Value>) -> Self {
        self.task.bytes_written = Some(bytes.into());
        self
    }

    pub fn build(self) -> RawTask {
        self.task
    }
}

/// A validated cluster; panics on invalid parameters.
pub fn cluster(
    num_nodes: usize,
    cores_per_node: usize,
    core_speed: f64,
    read_bw: f64,
    write_bw: f64,
) -> ClusterSpec {
    ClusterSpec::new(num_nodes, cores_per_node, core_speed, read_bw, write_bw)
        .expect("Failed to build valid cluster from test helper")
}
