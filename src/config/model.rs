// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::platform::PlatformRates;
use crate::types::BatchTime;
use crate::wfcommons::BuilderOptions;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [builder]
/// cost_scale_factor = 1.0
/// allow_redundant_dependencies = false
///
/// [estimator]
/// batch_time = "mean"
///
/// [profile.summit]
/// core_speed = "61.54Gf"
/// io_read_bw = "3.548GBps"
/// io_write_bw = "4.283GBps"
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub builder: BuilderSection,

    #[serde(default)]
    pub estimator: EstimatorSection,

    /// Named cluster profiles from `[profile.<name>]`.
    #[serde(default)]
    pub profile: BTreeMap<String, RawProfile>,
}

/// `[builder]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuilderSection {
    /// Multiplier from declared CPU work to cost units.
    #[serde(default = "default_cost_scale_factor")]
    pub cost_scale_factor: f64,

    #[serde(default)]
    pub allow_redundant_dependencies: bool,
}

fn default_cost_scale_factor() -> f64 {
    1.0
}

impl Default for BuilderSection {
    fn default() -> Self {
        Self {
            cost_scale_factor: default_cost_scale_factor(),
            allow_redundant_dependencies: false,
        }
    }
}

impl BuilderSection {
    pub fn options(&self) -> BuilderOptions {
        BuilderOptions {
            cost_scale_factor: self.cost_scale_factor,
            allow_redundant_dependencies: self.allow_redundant_dependencies,
        }
    }
}

/// `[estimator]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EstimatorSection {
    /// `"mean"` (default) or `"max"`.
    #[serde(default)]
    pub batch_time: BatchTime,
}

/// A rate given either as a plain number (base units) or a unit string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

/// `[profile.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub core_speed: RateValue,
    pub io_read_bw: RateValue,
    pub io_write_bw: RateValue,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub builder: BuilderSection,
    pub estimator: EstimatorSection,
    /// Profiles with all rates parsed to base units.
    pub profiles: BTreeMap<String, PlatformRates>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        builder: BuilderSection,
        estimator: EstimatorSection,
        profiles: BTreeMap<String, PlatformRates>,
    ) -> Self {
        Self {
            builder,
            estimator,
            profiles,
        }
    }
}
