// src/estimate/cluster.rs

use crate::errors::{Result, WfError};
use crate::platform::PlatformRates;

/// Homogeneous cluster the workflow is estimated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSpec {
    pub num_nodes: usize,
    pub cores_per_node: usize,
    /// Compute rate of one core (cost units per second).
    pub core_speed: f64,
    /// Per-node I/O read bandwidth (bytes per second).
    pub io_read_bw_per_node: f64,
    /// Per-node I/O write bandwidth (bytes per second).
    pub io_write_bw_per_node: f64,
}

impl ClusterSpec {
    /// Validated constructor: counts must be >= 1 and rates finite and > 0.
    pub fn new(
        num_nodes: usize,
        cores_per_node: usize,
        core_speed: f64,
        io_read_bw_per_node: f64,
        io_write_bw_per_node: f64,
    ) -> Result<Self> {
        if num_nodes == 0 {
            return Err(WfError::PlatformError("num_nodes must be >= 1".to_string()));
        }
        if cores_per_node == 0 {
            return Err(WfError::PlatformError(
                "cores_per_node must be >= 1".to_string(),
            ));
        }
        ensure_positive("core_speed", core_speed)?;
        ensure_positive("io_read_bw_per_node", io_read_bw_per_node)?;
        ensure_positive("io_write_bw_per_node", io_write_bw_per_node)?;

        Ok(Self {
            num_nodes,
            cores_per_node,
            core_speed,
            io_read_bw_per_node,
            io_write_bw_per_node,
        })
    }

    pub fn from_rates(num_nodes: usize, cores_per_node: usize, rates: PlatformRates) -> Result<Self> {
        Self::new(
            num_nodes,
            cores_per_node,
            rates.core_speed,
            rates.io_read_bw,
            rates.io_write_bw,
        )
    }

    /// Number of tasks the cluster runs at once.
    pub fn total_cores(&self) -> usize {
        self.num_nodes * self.cores_per_node
    }
}

pub(crate) fn ensure_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WfError::PlatformError(format!(
            "{what} must be a finite positive number (got {value})"
        )))
    }
}
