//! Tests for the configuration module.

use super::*;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;

/// Serialises tests that mutate PLATFORM_* environment variables
static ENV_TEST_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.log_level, "info");
    assert!(config.registry.excluded.is_empty());
    assert!(config.local.enabled);
    assert_eq!(config.local.profile_name, "player");
    assert_eq!(config.local.storage_dir, "storage");
}

#[test]
fn test_local_storage_path_is_relative_to_data_dir() {
    let config = CentralConfig::default();
    assert_eq!(
        config.local_storage_path(),
        PathBuf::from("./data").join("storage")
    );
}

#[test]
fn test_local_storage_path_keeps_absolute_dir() {
    let mut config = CentralConfig::default();
    config.local.storage_dir = "/var/lib/saves".into();
    assert_eq!(config.local_storage_path(), PathBuf::from("/var/lib/saves"));
}

#[test]
fn test_platform_env_overrides() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();
    std::env::set_var("PLATFORM_COMMON_LOG_LEVEL", "debug");
    std::env::set_var("PLATFORM_LOCAL_ENABLED", "false");
    std::env::set_var("PLATFORM_REGISTRY_EXCLUDED", "steam, psn,,");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.log_level, "debug");
    assert!(!config.local.enabled);
    assert_eq!(
        config.registry.excluded,
        vec!["steam".to_string(), "psn".to_string()]
    );

    std::env::remove_var("PLATFORM_COMMON_LOG_LEVEL");
    std::env::remove_var("PLATFORM_LOCAL_ENABLED");
    std::env::remove_var("PLATFORM_REGISTRY_EXCLUDED");
}

#[test]
fn test_unparseable_override_is_ignored() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();
    std::env::set_var("PLATFORM_LOCAL_ENABLED", "maybe");
    let config = apply_env_overrides(CentralConfig::default());
    assert!(config.local.enabled);
    std::env::remove_var("PLATFORM_LOCAL_ENABLED");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
data_dir = "/custom/data"

[registry]
excluded = ["platform_steam::SteamInitializer"]

[local]
enabled = false
profile_name = "tester"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.data_dir, "/custom/data");
    assert_eq!(
        config.registry.excluded,
        vec!["platform_steam::SteamInitializer".to_string()]
    );
    assert!(!config.local.enabled);
    assert_eq!(config.local.profile_name, "tester");
    assert_eq!(config.local.storage_dir, "storage"); // Default
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[local]
profile_name = "solo"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.local.profile_name, "solo");
    assert!(config.local.enabled); // Default
    assert_eq!(config.common.log_level, "info"); // Default
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();
    let config = load_from_path(std::path::Path::new("/nonexistent/platform/config.toml"));
    assert_eq!(config.local.profile_name, "player");
}

#[test]
fn test_explicit_config_path_is_loaded() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[local]\nprofile_name = \"from_file\"\n").unwrap();

    std::env::set_var(CONFIG_PATH_VAR, &path);
    let found = find_config_file();
    let config = load_config();
    std::env::remove_var(CONFIG_PATH_VAR);

    assert_eq!(found, Some(path));
    assert_eq!(config.local.profile_name, "from_file");
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[local\nenabled = ").unwrap();

    let config = load_from_path(&path);
    assert!(config.local.enabled);
    assert_eq!(config.local.profile_name, "player");
}
