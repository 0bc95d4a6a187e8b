// tests/platform_resolution.rs
mod common;
use crate::common::{approx_eq, init_tracing};

use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use wfmakespan::config::load_and_validate;
use wfmakespan::errors::WfError;
use wfmakespan::estimate::ClusterSpec;
use wfmakespan::platform::{
    ConfigCatalog, PlatformRates, ProfileCatalog, SiUnitParser, resolve_platform,
};

type TestResult = Result<(), Box<dyn Error>>;

fn demo_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/wfmakespan.toml")
}

#[test]
fn explicit_rates_are_parsed() -> TestResult {
    init_tracing();

    let rates = resolve_platform("200Gf:100MBps:80kbps", &SiUnitParser, &ConfigCatalog::default())?;

    assert!(approx_eq(rates.core_speed, 200e9));
    assert!(approx_eq(rates.io_read_bw, 100e6));
    assert!(approx_eq(rates.io_write_bw, 10e3));
    Ok(())
}

#[test]
fn profile_is_looked_up_by_name() -> TestResult {
    init_tracing();

    let mut profiles = BTreeMap::new();
    profiles.insert(
        "tiny".to_string(),
        PlatformRates {
            core_speed: 1.0,
            io_read_bw: 2.0,
            io_write_bw: 3.0,
        },
    );
    let catalog = ConfigCatalog::new(profiles);

    let rates = resolve_platform(" tiny ", &SiUnitParser, &catalog)?;
    assert_eq!(rates.io_write_bw, 3.0);
    assert_eq!(catalog.names(), vec!["tiny".to_string()]);
    Ok(())
}

#[test]
fn profiles_come_from_config_file() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[profile.lab]
core_speed = "2Gf"
io_read_bw = 1000
io_write_bw = "1KiBps"
"#
    )?;
    file.flush()?;

    let cfg = load_and_validate(file.path())?;
    let catalog = ConfigCatalog::from_config(&cfg);
    let rates = resolve_platform("lab", &SiUnitParser, &catalog)?;

    assert!(approx_eq(rates.core_speed, 2e9));
    assert!(approx_eq(rates.io_read_bw, 1000.0));
    assert!(approx_eq(rates.io_write_bw, 1024.0));
    Ok(())
}

#[test]
fn demo_config_defines_summit() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_config())?;
    let rates = resolve_platform("summit", &SiUnitParser, &ConfigCatalog::from_config(&cfg))?;

    assert!(approx_eq(rates.core_speed, 61_542_488_337.574_22));
    assert!(approx_eq(rates.io_read_bw, 3_548_253_968.0));
    assert!(approx_eq(rates.io_write_bw, 4_283_134_921.0));
    Ok(())
}

#[test]
fn unknown_profile_lists_known_names() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo_config())?;
    let err = resolve_platform("frontier", &SiUnitParser, &ConfigCatalog::from_config(&cfg))
        .unwrap_err();

    match err {
        WfError::PlatformError(msg) => {
            assert!(msg.contains("frontier"), "message: {msg}");
            assert!(msg.contains("summit"), "message: {msg}");
        }
        other => panic!("expected PlatformError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn explicit_spec_needs_three_rates() {
    init_tracing();

    for spec in ["100Gf:1GBps", "100Gf:1GBps:1GBps:1GBps", "100Gf::1GBps"] {
        let err = resolve_platform(spec, &SiUnitParser, &ConfigCatalog::default()).unwrap_err();
        assert!(matches!(err, WfError::PlatformError(_)), "{spec}: got {err:?}");
    }
}

#[test]
fn cluster_rejects_degenerate_parameters() {
    init_tracing();

    let bad = [
        ClusterSpec::new(0, 1, 1.0, 1.0, 1.0),
        ClusterSpec::new(1, 0, 1.0, 1.0, 1.0),
        ClusterSpec::new(1, 1, 0.0, 1.0, 1.0),
        ClusterSpec::new(1, 1, 1.0, -1.0, 1.0),
        ClusterSpec::new(1, 1, 1.0, 1.0, f64::INFINITY),
    ];
    for result in bad {
        assert!(matches!(result, Err(WfError::PlatformError(_))), "got {result:?}");
    }

    let ok = ClusterSpec::new(3, 4, 1.0, 1.0, 1.0).unwrap();
    assert_eq!(ok.total_cores(), 12);
}
