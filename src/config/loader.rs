// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a TOML config without checking any values.
///
/// Missing sections fall back to their `Default`s.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let raw: RawConfigFile = toml::from_str(&text)?;

    debug!(
        path = %path.display(),
        profiles = raw.profile.len(),
        "config file parsed"
    );
    Ok(raw)
}

/// Read a config and validate it: the builder scale must be positive and
/// every `[profile.<name>]` rate must parse to a positive number.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    ConfigFile::try_from(load_from_path(path)?)
}

/// Config at `path` if one was given, built-in defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    let Some(path) = path else {
        debug!("no config file given; using defaults");
        return Ok(ConfigFile::default());
    };
    load_and_validate(path)
}
