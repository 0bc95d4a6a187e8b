// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod estimate;
pub mod logging;
pub mod platform;
pub mod report;
pub mod types;
pub mod wfcommons;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::dag::WorkflowSummary;
use crate::estimate::{ClusterSpec, MakespanEstimates, level_batched, no_overlap, overlap};
use crate::platform::{ConfigCatalog, RateParser, SiUnitParser, resolve_platform};
use crate::types::BatchTime;
use crate::wfcommons::{BuilderOptions, RawWorkflowDocument, WorkflowBuilder};

/// Totals and estimates for one workflow on one cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub summary: WorkflowSummary,
    pub estimates: MakespanEstimates,
}

/// Build and estimate a workflow whose declared CPU work is scaled to flops
/// by `options.cost_scale_factor`.
///
/// The level-batched estimator reads task cost as seconds, so it runs on a
/// second graph built from the same records with costs divided by the
/// cluster's core speed. Totals and the naive estimators use the flop graph.
pub fn estimate_document(
    doc: &RawWorkflowDocument,
    options: BuilderOptions,
    cluster: &ClusterSpec,
    batch_time: BatchTime,
) -> crate::errors::Result<Estimation> {
    let flop_graph = WorkflowBuilder::new(options).build(doc)?;

    let seconds_options = BuilderOptions {
        cost_scale_factor: options.cost_scale_factor / cluster.core_speed,
        ..options
    };
    let seconds_graph = WorkflowBuilder::new(seconds_options).build(doc)?;

    let estimates = MakespanEstimates {
        no_overlap: no_overlap(&flop_graph, cluster),
        overlap: overlap(&flop_graph, cluster),
        level_batched: level_batched(&seconds_graph, cluster, batch_time),
    };

    Ok(Estimation {
        summary: WorkflowSummary::of(&flop_graph),
        estimates,
    })
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional file)
/// - platform resolution (explicit rates or named profile)
/// - workflow parsing and graph construction
/// - the three estimators and the report
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;

    let parser = SiUnitParser;
    let catalog = ConfigCatalog::from_config(&cfg);
    let rates = resolve_platform(&args.platform_spec, &parser, &catalog)?;
    let cluster = ClusterSpec::from_rates(
        args.num_nodes as usize,
        args.num_cores_per_node as usize,
        rates,
    )?;

    let cost_scale_factor = match args.flops_per_unit_of_cpu_work.as_deref() {
        Some(s) => parser.parse_compute_speed(s)?,
        None => cfg.builder.cost_scale_factor,
    };
    estimate::cluster::ensure_positive("flops_per_unit_of_cpu_work", cost_scale_factor)?;
    let mut options = cfg.builder.options();
    options.cost_scale_factor = cost_scale_factor;
    options.allow_redundant_dependencies |= args.allow_redundant_dependencies;
    let batch_time = args
        .batch_time
        .map(BatchTime::from)
        .unwrap_or(cfg.estimator.batch_time);

    info!(?cluster, ?options, %batch_time, "estimating workflow makespan");

    let contents = std::fs::read_to_string(&args.workflow)
        .with_context(|| format!("reading workflow file at {:?}", args.workflow))?;
    let doc = RawWorkflowDocument::from_json_str(&contents)?;

    let result = estimate_document(&doc, options, &cluster, batch_time)?;
    debug!(?result, "estimation complete");

    print!(
        "{}",
        report::render(&result.summary, &cluster, &result.estimates, batch_time)
    );
    Ok(())
}
