// src/platform/units.rs

//! Parsing of rate strings such as `"100Gf"`, `"1.5GBps"` or `"80kbps"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, WfError};

/// Converts human-readable rate strings to base units.
///
/// Compute speeds are returned in flop/s, bandwidths in bytes/s.
pub trait RateParser {
    fn parse_compute_speed(&self, s: &str) -> Result<f64>;
    fn parse_bandwidth(&self, s: &str) -> Result<f64>;
}

/// `<number><prefix?><i?><unit?>`, e.g. `100Gf`, `2.5 TiBps`, `10`.
static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?)\s*([kKMGTPE]?)(i?)([A-Za-z/]*)\s*$")
        .expect("static rate regex is valid")
});

/// SI / binary prefix rate parser.
///
/// Compute units: `f`, `flops`, `Flops` or none.
/// Bandwidth units: `Bps` / `B/s` (bytes), `bps` / `b/s` (bits), or none
/// (bytes).
#[derive(Debug, Clone, Copy, Default)]
pub struct SiUnitParser;

impl SiUnitParser {
    fn split<'a>(&self, s: &'a str) -> Result<(f64, f64, &'a str)> {
        let caps = RATE_RE
            .captures(s)
            .ok_or_else(|| WfError::PlatformError(format!("cannot parse rate '{s}'")))?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| WfError::PlatformError(format!("invalid number in rate '{s}'")))?;

        let binary = !caps[3].is_empty();
        let base: f64 = if binary { 1024.0 } else { 1000.0 };
        let exponent = match &caps[2] {
            "" => 0,
            "k" | "K" => 1,
            "M" => 2,
            "G" => 3,
            "T" => 4,
            "P" => 5,
            "E" => 6,
            other => {
                return Err(WfError::PlatformError(format!(
                    "unknown prefix '{other}' in rate '{s}'"
                )));
            }
        };
        if binary && exponent == 0 {
            return Err(WfError::PlatformError(format!(
                "binary marker without prefix in rate '{s}'"
            )));
        }

        let unit = caps.get(4).map_or("", |m| m.as_str());
        Ok((value, base.powi(exponent), unit))
    }
}

impl RateParser for SiUnitParser {
    fn parse_compute_speed(&self, s: &str) -> Result<f64> {
        let (value, scale, unit) = self.split(s)?;
        match unit {
            "" | "f" | "flops" | "Flops" | "flop/s" => Ok(value * scale),
            other => Err(WfError::PlatformError(format!(
                "unknown compute speed unit '{other}' in '{s}'"
            ))),
        }
    }

    fn parse_bandwidth(&self, s: &str) -> Result<f64> {
        let (value, scale, unit) = self.split(s)?;
        match unit {
            "" | "Bps" | "B/s" => Ok(value * scale),
            "bps" | "b/s" => Ok(value * scale / 8.0),
            other => Err(WfError::PlatformError(format!(
                "unknown bandwidth unit '{other}' in '{s}'"
            ))),
        }
    }
}
