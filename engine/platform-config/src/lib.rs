//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the platform crates and the probe binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`PLATFORM_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! PLATFORM_<SECTION>_<KEY>=value
//!
//! Examples:
//!     PLATFORM_COMMON_DATA_DIR=/data
//!     PLATFORM_COMMON_LOG_LEVEL=debug
//!     PLATFORM_REGISTRY_EXCLUDED=steam,psn
//!     PLATFORM_LOCAL_ENABLED=false
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_from_path, CONFIG_PATH_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
