// tests/error_handling.rs
mod common;
use crate::common::builders::{TaskRecordBuilder, WorkflowDocBuilder};
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;
use wfmakespan::config::{load_and_validate, load_or_default};
use wfmakespan::errors::WfError;
use wfmakespan::types::BatchTime;
use wfmakespan::wfcommons::{BuilderOptions, RawWorkflowDocument, WorkflowBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn write_temp(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn invalid_json_is_a_format_error() {
    init_tracing();

    let err = WorkflowBuilder::default().build_from_str("{ not json").unwrap_err();
    assert!(matches!(err, WfError::FormatError(_)), "got {err:?}");
}

#[test]
fn missing_workflow_container_is_a_format_error() {
    init_tracing();

    let doc = WorkflowDocBuilder::new().without_workflow().build();
    let err = WorkflowBuilder::default().build(&doc).unwrap_err();

    match err {
        WfError::FormatError(msg) => assert!(msg.contains("workflow")),
        other => panic!("expected FormatError, got {other:?}"),
    }
}

#[test]
fn non_compute_task_is_rejected() {
    init_tracing();

    let doc = WorkflowDocBuilder::new()
        .with_task(TaskRecordBuilder::new("ok", 1.0).build())
        .with_task(TaskRecordBuilder::new("stage_in", 1.0).kind("transfer").build())
        .build();

    let err = WorkflowBuilder::default().build(&doc).unwrap_err();
    match err {
        WfError::UnsupportedTaskType { task, kind } => {
            assert_eq!(task, "stage_in");
            assert_eq!(kind, "transfer");
        }
        other => panic!("expected UnsupportedTaskType, got {other:?}"),
    }
}

#[test]
fn duplicate_task_name_is_rejected() {
    init_tracing();

    let doc = WorkflowDocBuilder::new()
        .with_task(TaskRecordBuilder::new("twice", 1.0).build())
        .with_task(TaskRecordBuilder::new("twice", 2.0).build())
        .build();

    let err = WorkflowBuilder::default().build(&doc).unwrap_err();
    assert!(matches!(err, WfError::DuplicateTask(ref id) if id == "twice"), "got {err:?}");
}

#[test]
fn missing_cpu_work_is_a_format_error() {
    init_tracing();

    let doc = WorkflowDocBuilder::new()
        .with_task(
            TaskRecordBuilder::new("t", 1.0)
                .arguments(&["t", "--percent-cpu 1.0"])
                .build(),
        )
        .with_task(
            TaskRecordBuilder::new("u", 1.0)
                .arguments(&["--cpu-work lots"])
                .build(),
        )
        .build();

    let err = WorkflowBuilder::default().build(&doc).unwrap_err();
    match err {
        WfError::FormatError(msg) => assert!(msg.contains("'t'"), "message: {msg}"),
        other => panic!("expected FormatError, got {other:?}"),
    }
}

#[test]
fn malformed_records_are_format_errors() {
    init_tracing();

    let negative_size = r#"{ "workflow": { "tasks": [ {
        "name": "t", "type": "compute",
        "command": { "arguments": ["--cpu-work 1"] },
        "parents": [],
        "files": [ { "name": "f", "size": -5, "link": "input" } ]
    } ] } }"#;

    let missing_parents = r#"{ "workflow": { "tasks": [ {
        "name": "t", "type": "compute",
        "command": { "arguments": ["--cpu-work 1"] },
        "files": []
    } ] } }"#;

    let err = RawWorkflowDocument::from_json_str(missing_parents).unwrap_err();
    assert!(matches!(err, WfError::FormatError(_)), "got {err:?}");

    // Sizes parse as any number; the builder rejects negative ones.
    RawWorkflowDocument::from_json_str(negative_size).unwrap();
    let err = WorkflowBuilder::default().build_from_str(negative_size).unwrap_err();
    match err {
        WfError::FormatError(msg) => assert!(msg.contains("invalid size"), "message: {msg}"),
        other => panic!("expected FormatError, got {other:?}"),
    }
}

#[test]
fn non_numeric_size_is_a_format_error() {
    init_tracing();

    let json = r#"{ "workflow": { "tasks": [ {
        "name": "t", "type": "compute",
        "command": { "arguments": ["--cpu-work 1"] },
        "parents": [],
        "files": [ { "name": "f", "size": "big", "link": "input" } ]
    } ] } }"#;

    let err = WorkflowBuilder::default().build_from_str(json).unwrap_err();
    assert!(matches!(err, WfError::FormatError(_)), "got {err:?}");
}

#[test]
fn cycle_is_reported() {
    init_tracing();

    let doc = WorkflowDocBuilder::new()
        .with_task(TaskRecordBuilder::new("a", 1.0).parent("c").build())
        .with_task(TaskRecordBuilder::new("b", 1.0).parent("a").build())
        .with_task(TaskRecordBuilder::new("c", 1.0).parent("b").build())
        .build();

    let err = WorkflowBuilder::default().build(&doc).unwrap_err();
    assert!(matches!(err, WfError::DagCycle(_)), "got {err:?}");
}

#[test]
fn missing_workflow_file_is_an_io_error() {
    init_tracing();

    let err = WorkflowBuilder::default()
        .build_from_path("/definitely/not/here/workflow.json")
        .unwrap_err();
    assert!(matches!(err, WfError::IoError(_)), "got {err:?}");
}

#[test]
fn config_rejects_non_positive_scale() -> TestResult {
    init_tracing();

    let file = write_temp("[builder]\ncost_scale_factor = 0.0\n")?;
    let err = load_and_validate(file.path()).unwrap_err();

    match err {
        WfError::ConfigError(msg) => assert!(msg.contains("cost_scale_factor")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn config_rejects_unparseable_profile_rate() -> TestResult {
    init_tracing();

    let file = write_temp(
        r#"
[profile.broken]
core_speed = "100Gf"
io_read_bw = "fast"
io_write_bw = "1GBps"
"#,
    )?;
    let err = load_and_validate(file.path()).unwrap_err();

    match err {
        WfError::ConfigError(msg) => {
            assert!(msg.contains("[profile.broken].io_read_bw"), "message: {msg}")
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn config_rejects_invalid_toml() -> TestResult {
    init_tracing();

    let file = write_temp("[builder\ncost_scale_factor = 1.0\n")?;
    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, WfError::TomlError(_)), "got {err:?}");

    let file = write_temp("[estimator]\nbatch_time = \"median\"\n")?;
    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, WfError::TomlError(_)), "got {err:?}");
    Ok(())
}

#[test]
fn missing_config_file_is_an_io_error() {
    init_tracing();

    let err = load_and_validate("/definitely/not/here/wfmakespan.toml").unwrap_err();
    assert!(matches!(err, WfError::IoError(_)), "got {err:?}");
}

#[test]
fn no_config_path_gives_defaults() -> TestResult {
    init_tracing();

    let cfg = load_or_default(None)?;
    assert_eq!(cfg.builder.cost_scale_factor, 1.0);
    assert!(!cfg.builder.allow_redundant_dependencies);
    assert_eq!(cfg.estimator.batch_time, BatchTime::Mean);
    assert!(cfg.profiles.is_empty());
    assert_eq!(cfg.builder.options(), BuilderOptions::default());
    Ok(())
}

#[test]
fn builder_section_feeds_builder_options() -> TestResult {
    init_tracing();

    let file = write_temp("[builder]\ncost_scale_factor = 2.5\nallow_redundant_dependencies = true\n")?;
    let options = load_and_validate(file.path())?.builder.options();

    assert_eq!(options.cost_scale_factor, 2.5);
    assert!(options.allow_redundant_dependencies);
    Ok(())
}
