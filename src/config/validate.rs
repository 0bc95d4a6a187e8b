// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{ConfigFile, RateValue, RawConfigFile, RawProfile};
use crate::errors::{Result, WfError};
use crate::platform::{PlatformRates, RateParser, SiUnitParser};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WfError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_builder(&raw)?;
        let profiles = parse_profiles(&raw.profile, &SiUnitParser)?;
        Ok(ConfigFile::new_unchecked(raw.builder, raw.estimator, profiles))
    }
}

fn validate_builder(cfg: &RawConfigFile) -> Result<()> {
    let scale = cfg.builder.cost_scale_factor;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(WfError::ConfigError(format!(
            "[builder].cost_scale_factor must be > 0 (got {scale})"
        )));
    }
    Ok(())
}

fn parse_profiles(
    raw: &BTreeMap<String, RawProfile>,
    parser: &dyn RateParser,
) -> Result<BTreeMap<String, PlatformRates>> {
    let mut profiles = BTreeMap::new();

    for (name, p) in raw.iter() {
        let rates = PlatformRates {
            core_speed: rate(name, "core_speed", &p.core_speed, |s| {
                parser.parse_compute_speed(s)
            })?,
            io_read_bw: rate(name, "io_read_bw", &p.io_read_bw, |s| parser.parse_bandwidth(s))?,
            io_write_bw: rate(name, "io_write_bw", &p.io_write_bw, |s| {
                parser.parse_bandwidth(s)
            })?,
        };
        profiles.insert(name.clone(), rates);
    }

    Ok(profiles)
}

fn rate(
    profile: &str,
    field: &str,
    value: &RateValue,
    parse: impl Fn(&str) -> Result<f64>,
) -> Result<f64> {
    let parsed = match value {
        RateValue::Number(n) => *n,
        RateValue::Text(s) => parse(s).map_err(|e| {
            WfError::ConfigError(format!("[profile.{profile}].{field}: {e}"))
        })?,
    };

    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(WfError::ConfigError(format!(
            "[profile.{profile}].{field} must be > 0 (got {parsed})"
        )));
    }
    Ok(parsed)
}
