// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a batch of concurrently scheduled tasks contributes to its level's time
/// in the level-batched estimator.
///
/// - `Mean`: sum of the contended task durations divided by the batch size.
///   This is the historical behaviour and the default.
/// - `Max`: duration of the slowest contended task, i.e. the batch finishes
///   when its last task does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchTime {
    #[default]
    Mean,
    Max,
}

impl FromStr for BatchTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(BatchTime::Mean),
            "max" => Ok(BatchTime::Max),
            other => Err(format!(
                "invalid batch_time: {other} (expected \"mean\" or \"max\")"
            )),
        }
    }
}

impl fmt::Display for BatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchTime::Mean => write!(f, "mean"),
            BatchTime::Max => write!(f, "max"),
        }
    }
}

/// Role of a file declaration inside a task record.
///
/// Anything other than `input` / `output` deserializes to `Other` and is
/// ignored by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileLink {
    Input,
    Output,
    #[serde(other)]
    Other,
}
