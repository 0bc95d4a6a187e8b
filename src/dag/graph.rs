// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::dag::task::{DataFile, FileId, Task};
use crate::errors::{Result, WfError};

/// What happened to a requested `parent -> child` dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// A new edge was stored.
    Inserted,
    /// The exact edge already exists; nothing changed.
    Duplicate,
    /// A path `parent ~> child` already exists and redundant edges are not
    /// allowed; nothing changed.
    Redundant,
    /// `parent == child`; nothing changed.
    SelfReference,
}

/// In-memory workflow DAG: tasks as nodes, control dependencies as edges
/// (`parent -> child`), plus the arena of files the tasks reference.
///
/// Instances are produced by [`WorkflowBuilder`](crate::wfcommons::WorkflowBuilder),
/// which levels the graph once construction completes. Callers only get
/// read access afterwards.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    graph: DiGraph<Task, ()>,
    task_index: HashMap<String, NodeIndex>,
    files: Vec<DataFile>,
    file_index: HashMap<String, FileId>,
    /// Number of distinct levels; 0 while unleveled or empty.
    level_count: usize,
}

impl WorkflowGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // ---- construction (crate-private) ----

    /// Insert a task. Fails if a task with the same id exists.
    pub(crate) fn add_task(&mut self, task: Task) -> Result<NodeIndex> {
        if self.task_index.contains_key(&task.id) {
            return Err(WfError::DuplicateTask(task.id));
        }
        let id = task.id.clone();
        let node = self.graph.add_node(task);
        self.task_index.insert(id, node);
        self.clear_levels();
        Ok(node)
    }

    /// Insert a new file. The caller checks for an existing id first.
    pub(crate) fn add_file(&mut self, id: impl Into<String>, size: f64) -> FileId {
        let id = id.into();
        let file_id = FileId(self.files.len());
        self.file_index.insert(id.clone(), file_id);
        self.files.push(DataFile { id, size });
        file_id
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        let node = self.node_of(id)?;
        Ok(&mut self.graph[node])
    }

    /// Add a control dependency `parent -> child`.
    ///
    /// With `allow_redundant == false`, the edge is skipped when `child` is
    /// already reachable from `parent`.
    pub(crate) fn add_dependency(
        &mut self,
        parent: &str,
        child: &str,
        allow_redundant: bool,
    ) -> Result<EdgeInsertion> {
        let p = self.node_of(parent)?;
        let c = self.node_of(child)?;

        if p == c {
            return Ok(EdgeInsertion::SelfReference);
        }
        if self.graph.contains_edge(p, c) {
            return Ok(EdgeInsertion::Duplicate);
        }
        if !allow_redundant && has_path_connecting(&self.graph, p, c, None) {
            return Ok(EdgeInsertion::Redundant);
        }

        self.graph.add_edge(p, c, ());
        self.clear_levels();
        Ok(EdgeInsertion::Inserted)
    }

    pub(crate) fn inner(&self) -> &DiGraph<Task, ()> {
        &self.graph
    }

    /// Store per-node levels (indexed by `NodeIndex::index()`).
    pub(crate) fn set_levels(&mut self, levels: &[usize]) {
        for node in self.graph.node_indices() {
            self.graph[node].level = levels.get(node.index()).copied();
        }
        self.level_count = levels.iter().max().map_or(0, |max| max + 1);
    }

    fn clear_levels(&mut self) {
        if self.level_count == 0 {
            return;
        }
        for task in self.graph.node_weights_mut() {
            task.level = None;
        }
        self.level_count = 0;
    }

    fn node_of(&self, id: &str) -> Result<NodeIndex> {
        self.task_index
            .get(id)
            .copied()
            .ok_or_else(|| WfError::TaskNotFound(id.to_string()))
    }

    // ---- queries ----

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.graph.node_weights()
    }

    /// All files, in first-declaration order.
    pub fn files(&self) -> impl Iterator<Item = &DataFile> {
        self.files.iter()
    }

    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn task(&self, id: &str) -> Result<&Task> {
        let node = self.node_of(id)?;
        Ok(&self.graph[node])
    }

    pub fn file(&self, id: &str) -> Result<&DataFile> {
        self.file_index
            .get(id)
            .map(|f| &self.files[f.0])
            .ok_or_else(|| WfError::FileNotFound(id.to_string()))
    }

    pub(crate) fn file_id(&self, id: &str) -> Result<FileId> {
        self.file_index
            .get(id)
            .copied()
            .ok_or_else(|| WfError::FileNotFound(id.to_string()))
    }

    /// Resolve a [`FileId`] handed out by this graph.
    pub fn file_at(&self, id: FileId) -> &DataFile {
        &self.files[id.0]
    }

    pub fn input_files<'a>(&'a self, task: &'a Task) -> impl Iterator<Item = &'a DataFile> + 'a {
        task.inputs.iter().map(|f| self.file_at(*f))
    }

    pub fn output_files<'a>(&'a self, task: &'a Task) -> impl Iterator<Item = &'a DataFile> + 'a {
        task.outputs.iter().map(|f| self.file_at(*f))
    }

    /// Direct parents of a task.
    pub fn parents(&self, id: &str) -> Result<Vec<&Task>> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Direct children of a task.
    pub fn children(&self, id: &str) -> Result<Vec<&Task>> {
        self.neighbours(id, Direction::Outgoing)
    }

    fn neighbours(&self, id: &str, dir: Direction) -> Result<Vec<&Task>> {
        let node = self.node_of(id)?;
        let mut out: Vec<&Task> = self
            .graph
            .neighbors_directed(node, dir)
            .map(|n| &self.graph[n])
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    /// All dependency edges as sorted `(parent, child)` id pairs.
    ///
    /// Two graphs built from the same input compare equal on this list.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].id.clone(),
                    self.graph[e.target()].id.clone(),
                )
            })
            .collect();
        edges.sort();
        edges
    }

    /// Number of levels `L = 1 + max(level)`; 0 for an empty workflow.
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    /// Tasks whose level lies in the inclusive range `[lo, hi]`.
    pub fn tasks_in_level_range(&self, lo: usize, hi: usize) -> Vec<&Task> {
        self.tasks()
            .filter(|t| t.level.is_some_and(|l| l >= lo && l <= hi))
            .collect()
    }

    pub fn tasks_at_level(&self, level: usize) -> Vec<&Task> {
        self.tasks_in_level_range(level, level)
    }
}
