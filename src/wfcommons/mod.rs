// src/wfcommons/mod.rs

//! Reading WfCommons workflow descriptions.
//!
//! - [`raw`] holds the serde mapping of the JSON document.
//! - [`builder`] turns raw records into a leveled [`WorkflowGraph`](crate::dag::WorkflowGraph).

pub mod builder;
pub mod raw;

pub use builder::{BuilderOptions, WorkflowBuilder};
pub use raw::{RawCommand, RawFile, RawTask, RawWorkflow, RawWorkflowDocument};
