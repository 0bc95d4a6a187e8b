// src/dag/task.rs

//! Task and file entities stored in a [`WorkflowGraph`](crate::dag::WorkflowGraph).

/// Index of a file in the graph's file arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

/// A data artifact, shared by every task that reads or writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub id: String,
    /// Size in bytes, fixed by the first declaration of this id. Always
    /// finite and non-negative.
    pub size: f64,
}

/// Optional per-task metadata carried through from the input.
///
/// None of these fields influence the estimators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMetadata {
    pub priority: Option<i64>,
    pub avg_cpu: Option<f64>,
    pub bytes_read: Option<u64>,
    pub bytes_written: Option<u64>,
}

/// A unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    /// Work quantity in estimator cost units (declared work times the
    /// builder's scale factor).
    pub cost: f64,
    /// Input files in declaration order, without duplicates.
    pub(crate) inputs: Vec<FileId>,
    /// Output files in declaration order, without duplicates.
    pub(crate) outputs: Vec<FileId>,
    /// Longest-path distance from a source task. `None` until leveled.
    pub(crate) level: Option<usize>,
    pub metadata: TaskMetadata,
}

impl Task {
    pub(crate) fn new(id: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            cost,
            inputs: Vec::new(),
            outputs: Vec::new(),
            level: None,
            metadata: TaskMetadata::default(),
        }
    }

    pub fn input_file_ids(&self) -> &[FileId] {
        &self.inputs
    }

    pub fn output_file_ids(&self) -> &[FileId] {
        &self.outputs
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub(crate) fn add_input(&mut self, file: FileId) {
        if !self.inputs.contains(&file) {
            self.inputs.push(file);
        }
    }

    pub(crate) fn add_output(&mut self, file: FileId) {
        if !self.outputs.contains(&file) {
            self.outputs.push(file);
        }
    }
}
