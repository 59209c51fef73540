//! Locating config.toml and layering environment overrides on top.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "PLATFORM_CONFIG";

/// Fallback locations tried in order when `PLATFORM_CONFIG` is unset or stale
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml", "/app/config.toml"];

/// First config file that exists, honouring `PLATFORM_CONFIG` before the
/// search paths
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from) {
        if explicit.is_file() {
            return Some(explicit);
        }
        warn!(path = %explicit.display(), "{} points to a missing file", CONFIG_PATH_VAR);
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

/// Load the effective configuration: file (if any), then env overrides.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Loading platform config");
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load configuration from a specific file.
///
/// A file that cannot be read or parsed is reported and replaced by the
/// built-in defaults; env overrides apply either way.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str::<CentralConfig>(&content).map_err(|e| e.to_string()));

    let config = parsed.unwrap_or_else(|reason| {
        warn!(path = %path.display(), %reason, "Ignoring unusable config file");
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

macro_rules! env_override {
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = v,
                Err(_) => warn!(var = $key, value = %raw, "Ignoring unparseable override"),
            }
        }
    };
    // Comma-separated, blanks dropped
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(raw) = std::env::var($key) {
            $config.$section.$field = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    };
}

/// Apply `PLATFORM_<SECTION>_<KEY>` overrides.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    env_override!(config, common.data_dir, "PLATFORM_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "PLATFORM_COMMON_LOG_LEVEL");

    env_override!(config, registry.excluded, "PLATFORM_REGISTRY_EXCLUDED", list);

    env_override!(config, local.enabled, "PLATFORM_LOCAL_ENABLED", parse);
    env_override!(config, local.profile_name, "PLATFORM_LOCAL_PROFILE_NAME");
    env_override!(config, local.storage_dir, "PLATFORM_LOCAL_STORAGE_DIR");

    config
}
