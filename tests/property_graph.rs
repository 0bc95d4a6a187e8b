// tests/property_graph.rs
mod common;
use crate::common::builders::{TaskRecordBuilder, WorkflowDocBuilder, cluster};

use std::collections::BTreeSet;

use proptest::prelude::*;
use wfmakespan::estimate::{level_batched, no_overlap, overlap};
use wfmakespan::types::BatchTime;
use wfmakespan::wfcommons::{BuilderOptions, RawWorkflowDocument, WorkflowBuilder};

/// A generated workflow plus the distinct `(parent, child)` pairs it declares.
#[derive(Debug, Clone)]
struct GeneratedWorkflow {
    doc: RawWorkflowDocument,
    declared: BTreeSet<(String, String)>,
    tasks: usize,
}

fn task_name(i: usize) -> String {
    format!("task_{i:02}")
}

// Acyclic by construction: task i may only depend on tasks 0..i. Records are
// emitted in a shuffled order so that parents are often forward references.
fn workflow_strategy(max_tasks: usize) -> impl Strategy<Value = GeneratedWorkflow> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_tasks,
        );
        let order = Just((0..num_tasks).collect::<Vec<_>>()).prop_shuffle();
        let sizes = proptest::collection::vec(0u32..10_000, num_tasks);

        (deps, order, sizes).prop_map(move |(raw_deps, order, sizes)| {
            let mut declared = BTreeSet::new();
            let mut doc = WorkflowDocBuilder::new();

            for i in order {
                let mut task = TaskRecordBuilder::new(&task_name(i), (i + 1) as f64)
                    .output(&format!("out_{i}"), sizes[i]);

                if i > 0 {
                    for dep in &raw_deps[i] {
                        let parent = dep % i;
                        task = task.parent(&task_name(parent)).input(&format!("out_{parent}"), 0);
                        declared.insert((task_name(parent), task_name(i)));
                    }
                }
                doc = doc.with_task(task.build());
            }

            GeneratedWorkflow {
                doc: doc.build(),
                declared,
                tasks: num_tasks,
            }
        })
    })
}

fn options(allow_redundant: bool) -> BuilderOptions {
    BuilderOptions {
        cost_scale_factor: 1.0,
        allow_redundant_dependencies: allow_redundant,
    }
}

proptest! {
    #[test]
    fn every_record_becomes_a_task(wf in workflow_strategy(12)) {
        let graph = WorkflowBuilder::new(options(false)).build(&wf.doc).unwrap();
        prop_assert_eq!(graph.task_count(), wf.tasks);
        prop_assert_eq!(graph.file_count(), wf.tasks);
    }

    #[test]
    fn edges_match_declared_dependencies(wf in workflow_strategy(12)) {
        let kept = WorkflowBuilder::new(options(true)).build(&wf.doc).unwrap();
        let dropped = WorkflowBuilder::new(options(false)).build(&wf.doc).unwrap();

        let kept_edges: BTreeSet<_> = kept.edges().into_iter().collect();
        prop_assert_eq!(&kept_edges, &wf.declared);

        prop_assert!(dropped.edge_count() <= kept.edge_count());
        for edge in dropped.edges() {
            prop_assert!(wf.declared.contains(&edge));
        }
    }

    #[test]
    fn parents_sit_on_lower_levels(wf in workflow_strategy(12)) {
        let graph = WorkflowBuilder::new(options(true)).build(&wf.doc).unwrap();

        for (parent, child) in graph.edges() {
            let lp = graph.task(&parent).unwrap().level().unwrap();
            let lc = graph.task(&child).unwrap().level().unwrap();
            prop_assert!(lp < lc, "{} (level {}) -> {} (level {})", parent, lp, child, lc);
        }

        let max = graph.tasks().filter_map(|t| t.level()).max().unwrap();
        prop_assert_eq!(graph.level_count(), max + 1);
    }

    #[test]
    fn redundant_edges_never_change_levels(wf in workflow_strategy(12)) {
        let kept = WorkflowBuilder::new(options(true)).build(&wf.doc).unwrap();
        let dropped = WorkflowBuilder::new(options(false)).build(&wf.doc).unwrap();

        for task in kept.tasks() {
            prop_assert_eq!(task.level(), dropped.task(&task.id).unwrap().level());
        }
        prop_assert_eq!(kept.level_count(), dropped.level_count());
    }

    #[test]
    fn building_is_deterministic(wf in workflow_strategy(12)) {
        let builder = WorkflowBuilder::new(options(false));
        let first = builder.build(&wf.doc).unwrap();
        let second = builder.build(&wf.doc).unwrap();

        prop_assert_eq!(first.edges(), second.edges());
        for task in first.tasks() {
            prop_assert_eq!(task, second.task(&task.id).unwrap());
        }
    }

    #[test]
    fn estimator_orderings_hold(
        wf in workflow_strategy(12),
        nodes in 1usize..4,
        cores in 1usize..8,
    ) {
        let graph = WorkflowBuilder::new(options(false)).build(&wf.doc).unwrap();
        let c = cluster(nodes, cores, 2.0, 500.0, 250.0);

        prop_assert!(no_overlap(&graph, &c) >= overlap(&graph, &c));

        let mean = level_batched(&graph, &c, BatchTime::Mean);
        let max = level_batched(&graph, &c, BatchTime::Max);
        prop_assert!(mean <= max + 1e-9 * max.max(1.0));
    }
}
