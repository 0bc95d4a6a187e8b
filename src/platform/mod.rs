// src/platform/mod.rs

//! Platform rates: parsing rate strings and resolving named profiles.
//!
//! A platform spec is either `core_speed:read_bw:write_bw`
//! (e.g. `200Gf:100MBps:80kbps`) or the name of a profile known to a
//! [`ProfileCatalog`].

pub mod catalog;
pub mod units;

pub use catalog::{ConfigCatalog, ProfileCatalog};
pub use units::{RateParser, SiUnitParser};

use tracing::debug;

use crate::errors::{Result, WfError};

/// Per-core compute speed and per-node I/O bandwidths, in base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformRates {
    /// flop/s per core.
    pub core_speed: f64,
    /// bytes/s per node.
    pub io_read_bw: f64,
    /// bytes/s per node.
    pub io_write_bw: f64,
}

/// Resolve a platform spec string into rates.
pub fn resolve_platform(
    spec: &str,
    parser: &dyn RateParser,
    catalog: &dyn ProfileCatalog,
) -> Result<PlatformRates> {
    if spec.contains(':') {
        let tokens: Vec<&str> = spec.split(':').collect();
        let [speed, read, write] = tokens.as_slice() else {
            return Err(WfError::PlatformError(format!(
                "expected core_speed:read_bw:write_bw, got '{spec}'"
            )));
        };
        let rates = PlatformRates {
            core_speed: parser.parse_compute_speed(speed)?,
            io_read_bw: parser.parse_bandwidth(read)?,
            io_write_bw: parser.parse_bandwidth(write)?,
        };
        debug!(?rates, "platform parsed from explicit rates");
        return Ok(rates);
    }

    let name = spec.trim();
    let rates = catalog.lookup(name).ok_or_else(|| {
        WfError::PlatformError(format!(
            "unknown platform profile '{name}' (known profiles: [{}])",
            catalog.names().join(", ")
        ))
    })?;
    debug!(profile = name, ?rates, "platform resolved from profile");
    Ok(rates)
}
