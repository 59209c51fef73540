//! platform-probe - inspect runtime platform discovery
//!
//! A small command-line tool that:
//! 1. Registers the platforms compiled into this binary
//! 2. Lists registered initializers or runs a discovery pass
//! 3. Reads and writes save data through the selected platform

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use platform_core::InitializerCatalog;

mod commands;
mod config;

use crate::config::{Command, Config};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    debug!(log_level = %config.log_level, "Tracing initialized");

    platform_local::register_local();

    if !config.excluded.is_empty() {
        info!(excluded = ?config.excluded, "Excluding initializers from discovery");
    }
    let catalog = InitializerCatalog::global().with_excluded(config.excluded.iter().cloned());
    platform_core::install_catalog(catalog)?;
    let registry = platform_core::global();

    match &config.command {
        Command::List => commands::list(),
        Command::Discover { json } => commands::discover(registry, *json),
        Command::Storage { action } => commands::storage(registry, action),
    }
}
