//! Command-line configuration for platform-probe
//!
//! Defaults come from config.toml with environment variable overrides.
//! CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use platform_config::{load_config, CentralConfig};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_log_level() -> String {
    std::env::var("PROBE_LOG_LEVEL").unwrap_or_else(|_| CENTRAL_CONFIG.common.log_level.clone())
}

fn default_excluded() -> Vec<String> {
    CENTRAL_CONFIG.registry.excluded.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "platform-probe")]
#[command(about = "Inspect platform discovery and local storage")]
#[command(
    long_about = "Lists registered platform initializers, runs a discovery pass and
reports which platform was selected, and reads or writes save data through the
selected platform's storage service.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    /// Initializer name to skip during discovery (repeatable)
    #[arg(long = "exclude", global = true, default_values_t = default_excluded())]
    pub excluded: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered platform initializers
    List,
    /// Run a discovery pass and report the outcome
    Discover {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Use the selected platform's storage service
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StorageAction {
    /// Store a UTF-8 value under a key
    Put { key: String, value: String },
    /// Print the value stored under a key
    Get { key: String },
    /// Remove a key
    Delete { key: String },
    /// List stored keys
    Keys,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if let Some(blank) = self.excluded.iter().find(|name| name.trim().is_empty()) {
            return Err(anyhow!("--exclude value cannot be empty (got {:?})", blank));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            log_level: "info".into(),
            excluded: Vec::new(),
            command: Command::List,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_blank_exclusion() {
        let mut cfg = base_config();
        cfg.excluded = vec!["steam".into(), "  ".into()];
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("--exclude"));
    }

    #[test]
    fn parses_storage_put() {
        let cfg = Config::try_parse_from([
            "platform-probe",
            "--log-level",
            "debug",
            "storage",
            "put",
            "slot1",
            "level=3",
        ])
        .unwrap();

        assert_eq!(cfg.log_level, "debug");
        assert_eq!(
            cfg.command,
            Command::Storage {
                action: StorageAction::Put {
                    key: "slot1".into(),
                    value: "level=3".into(),
                }
            }
        );
    }

    #[test]
    fn parses_repeated_exclusions_after_subcommand() {
        let cfg = Config::try_parse_from([
            "platform-probe",
            "discover",
            "--json",
            "--exclude",
            "platform_steam::SteamInitializer",
            "--exclude",
            "platform_psn::PsnInitializer",
        ])
        .unwrap();

        assert_eq!(cfg.command, Command::Discover { json: true });
        assert_eq!(
            cfg.excluded,
            vec![
                "platform_steam::SteamInitializer".to_string(),
                "platform_psn::PsnInitializer".to_string()
            ]
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Config::try_parse_from(["platform-probe"]).is_err());
    }
}
