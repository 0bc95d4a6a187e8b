// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::BatchTime;

/// Command-line arguments for `wfmakespan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wfmakespan",
    version,
    about = "Estimate the makespan of a WfCommons workflow on a homogeneous cluster.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the JSON workflow description file.
    #[arg(long, value_name = "PATH")]
    pub workflow: PathBuf,

    /// Number of flops per unit of CPU work passed to the workflow task
    /// benchmark (e.g. "100Gf").
    ///
    /// Overrides `[builder].cost_scale_factor` from the config.
    #[arg(long, value_name = "RATE")]
    pub flops_per_unit_of_cpu_work: Option<String>,

    /// Either `per_core_flops:per_node_io_read_bw:per_node_io_write_bw`
    /// (e.g. "200Gf:100MBps:80kbps") or a profile name from the config file.
    #[arg(long, value_name = "SPEC")]
    pub platform_spec: String,

    /// Number of compute nodes used for running the workflow.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_nodes: u32,

    /// Number of cores per compute node.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_cores_per_node: u32,

    /// Optional config file (TOML) with builder/estimator settings and
    /// named platform profiles.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep dependencies that are already implied by other dependencies.
    #[arg(long)]
    pub allow_redundant_dependencies: bool,

    /// How a batch contributes to its level in the level-batched estimate.
    ///
    /// Overrides `[estimator].batch_time` from the config.
    #[arg(long, value_enum, value_name = "MODE")]
    pub batch_time: Option<BatchTimeArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WFMAKESPAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Batch time policy as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum BatchTimeArg {
    Mean,
    Max,
}

impl From<BatchTimeArg> for BatchTime {
    fn from(arg: BatchTimeArg) -> Self {
        match arg {
            BatchTimeArg::Mean => BatchTime::Mean,
            BatchTimeArg::Max => BatchTime::Max,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
