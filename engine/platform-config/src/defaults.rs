//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary agrees on
//! the same values without shipping the file alongside it.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    registry: RegistryDefaults,
    local: LocalDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct RegistryDefaults {
    excluded: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LocalDefaults {
    enabled: bool,
    profile_name: String,
    storage_dir: String,
}

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Registry
pub fn excluded() -> &'static [String] {
    &DEFAULTS.registry.excluded
}

// Local platform
pub fn local_enabled() -> bool {
    DEFAULTS.local.enabled
}
pub fn profile_name() -> &'static str {
    &DEFAULTS.local.profile_name
}
pub fn storage_dir() -> &'static str {
    &DEFAULTS.local.storage_dir
}
