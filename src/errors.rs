// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WfError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Workflow format error: {0}")]
    FormatError(String),

    #[error("Task '{task}' has unsupported type '{kind}' (only \"compute\" is supported)")]
    UnsupportedTaskType { task: String, kind: String },

    #[error("Duplicate task name: {0}")]
    DuplicateTask(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Cycle detected in workflow: {0}")]
    DagCycle(String),

    #[error("Invalid platform specification: {0}")]
    PlatformError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WfError>;
