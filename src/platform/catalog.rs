// src/platform/catalog.rs

use std::collections::BTreeMap;

use crate::config::ConfigFile;
use crate::platform::PlatformRates;

/// Lookup of named cluster profiles (e.g. `"summit"`).
pub trait ProfileCatalog {
    fn lookup(&self, name: &str) -> Option<PlatformRates>;

    /// Known profile names, for diagnostics.
    fn names(&self) -> Vec<String>;
}

/// Profiles declared in the `[profile.<name>]` sections of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigCatalog {
    profiles: BTreeMap<String, PlatformRates>,
}

impl ConfigCatalog {
    pub fn new(profiles: BTreeMap<String, PlatformRates>) -> Self {
        Self { profiles }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.profiles.clone())
    }
}

impl ProfileCatalog for ConfigCatalog {
    fn lookup(&self, name: &str) -> Option<PlatformRates> {
        self.profiles.get(name).copied()
    }

    fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}
