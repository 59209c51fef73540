//! Configuration struct definitions.

use crate::defaults;
use serde::Deserialize;
use std::path::PathBuf;

// Serde default functions (required for #[serde(default = "...")])

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_excluded() -> Vec<String> {
    defaults::excluded().to_vec()
}
fn d_local_enabled() -> bool {
    defaults::local_enabled()
}
fn d_profile_name() -> String {
    defaults::profile_name().into()
}
fn d_storage_dir() -> String {
    defaults::storage_dir().into()
}

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Platform discovery settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initializer names that discovery skips even when registered
    #[serde(default = "d_excluded")]
    pub excluded: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            excluded: defaults::excluded().to_vec(),
        }
    }
}

/// Local/offline platform settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocalConfig {
    /// When false the local initializer declines during discovery
    #[serde(default = "d_local_enabled")]
    pub enabled: bool,
    #[serde(default = "d_profile_name")]
    pub profile_name: String,
    /// Storage directory, relative to `common.data_dir` unless absolute
    #[serde(default = "d_storage_dir")]
    pub storage_dir: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::local_enabled(),
            profile_name: defaults::profile_name().into(),
            storage_dir: defaults::storage_dir().into(),
        }
    }
}

impl CentralConfig {
    /// Resolved directory used by file-backed local storage.
    pub fn local_storage_path(&self) -> PathBuf {
        let dir = PathBuf::from(&self.local.storage_dir);
        if dir.is_absolute() {
            dir
        } else {
            PathBuf::from(&self.common.data_dir).join(dir)
        }
    }
}
