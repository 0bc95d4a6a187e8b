// src/wfcommons/raw.rs

//! Raw records deserialized from a WfCommons JSON document.
//!
//! These are a direct mapping of the input format and are fully materialized
//! before any task or edge is created, so that parent references may point
//! at tasks appearing later in the document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, WfError};
use crate::types::FileLink;

/// Task kind accepted by the builder.
pub const COMPUTE_TASK_TYPE: &str = "compute";

/// Flag carrying the CPU work quantity inside `command.arguments`.
pub const CPU_WORK_FLAG: &str = "--cpu-work";

/// Top-level document.
///
/// ```json
/// { "name": "blast", "workflow": { "tasks": [ ... ] } }
/// ```
///
/// `workflow` is optional at the serde level so that its absence can be
/// reported as a format error with a useful message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<RawWorkflow>,
}

impl RawWorkflowDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| WfError::FormatError(format!("invalid workflow JSON: {e}")))
    }

    /// The `workflow` container, or a format error if it is missing.
    pub fn workflow(&self) -> Result<&RawWorkflow> {
        self.workflow.as_ref().ok_or_else(|| {
            WfError::FormatError("could not find a workflow entry".to_string())
        })
    }
}

/// The `workflow` object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWorkflow {
    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

/// One entry of `workflow.tasks`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTask {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub command: RawCommand,

    /// Names of tasks this one depends on.
    pub parents: Vec<String>,

    pub files: Vec<RawFile>,

    /// Optional metadata is kept as raw JSON and coerced by the builder, so a
    /// mistyped value is dropped instead of failing the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,

    #[serde(rename = "avgCPU", default, skip_serializing_if = "Option::is_none")]
    pub avg_cpu: Option<Value>,

    #[serde(rename = "bytesRead", default, skip_serializing_if = "Option::is_none")]
    pub bytes_read: Option<Value>,

    #[serde(
        rename = "bytesWritten",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bytes_written: Option<Value>,
}

/// `command` object of a task record. Only `arguments` matters here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default)]
    pub arguments: Vec<String>,
}

impl RawCommand {
    /// Extract the declared CPU work from the `--cpu-work` argument.
    ///
    /// Accepted forms:
    /// - `"--cpu-work 100"` (single argument, space separated)
    /// - `"--cpu-work=100"`
    /// - `"--cpu-work", "100"` (two consecutive arguments)
    pub fn cpu_work(&self) -> Option<f64> {
        let mut args = self.arguments.iter();
        while let Some(arg) = args.next() {
            let arg = arg.trim();
            let value = if let Some(rest) = arg.strip_prefix(CPU_WORK_FLAG) {
                if let Some(v) = rest.strip_prefix('=') {
                    Some(v.trim().to_string())
                } else if rest.is_empty() {
                    args.next().map(|v| v.trim().to_string())
                } else if rest.starts_with(char::is_whitespace) {
                    rest.split_whitespace().next().map(str::to_string)
                } else {
                    // e.g. "--cpu-worker": a different flag.
                    continue;
                }
            } else {
                continue;
            };

            return value.and_then(|v| v.parse::<f64>().ok());
        }
        None
    }
}

/// One entry of a task's `files` list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawFile {
    pub name: String,
    /// Byte count. Any JSON number is accepted here; the builder rejects
    /// negative and non-finite values.
    pub size: f64,
    pub link: FileLink,
}
