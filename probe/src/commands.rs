//! Subcommand implementations.

use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use platform_core::{
    AttemptStatus, DiscoveryReport, PlatformInfo, PlatformRegistry, ServiceKind, StorageService,
};

use crate::config::StorageAction;

/// JSON shape printed by `discover --json`
#[derive(Debug, Serialize)]
struct DiscoverOutput<'a> {
    platform: Option<PlatformInfo>,
    report: &'a DiscoveryReport,
}

pub fn list() -> Result<()> {
    let names = platform_core::list_registered_initializers();
    if names.is_empty() {
        println!("No platform initializers registered");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn discover(registry: &PlatformRegistry, json: bool) -> Result<()> {
    registry.initialize();
    let platform = registry.peek().map(|p| p.info());
    let report = registry
        .last_report()
        .ok_or_else(|| anyhow!("Discovery did not run"))?;

    if json {
        let output = DiscoverOutput {
            platform: platform.clone(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_report(&report, platform.as_ref()));
    }

    if platform.is_none() {
        bail!("No platform was selected");
    }
    Ok(())
}

/// Human-readable summary of a discovery pass
pub fn render_report(report: &DiscoveryReport, platform: Option<&PlatformInfo>) -> String {
    let mut out = String::new();

    out.push_str(&format!("Candidates: {}\n", report.candidates.len()));
    for attempt in &report.attempts {
        let status = match &attempt.status {
            AttemptStatus::Selected { platform_id } => {
                format!("selected ({})", platform_id)
            }
            AttemptStatus::Declined => "declined".to_string(),
            AttemptStatus::Failed { reason } => format!("failed: {}", reason),
        };
        out.push_str(&format!("  {} -> {}\n", attempt.initializer, status));
    }
    for name in &report.excluded {
        out.push_str(&format!("  {} -> excluded\n", name));
    }
    for source in &report.skipped_sources {
        out.push_str(&format!("  skipped source: {}\n", source));
    }

    match (platform, &report.error) {
        (Some(info), _) => {
            let services: Vec<&str> = ServiceKind::ALL
                .iter()
                .filter(|kind| info.supports(**kind))
                .map(|kind| kind.as_str())
                .collect();
            out.push_str(&format!(
                "Platform: {} ({}), services: {}\n",
                info.display_name,
                info.id,
                if services.is_empty() {
                    "none".to_string()
                } else {
                    services.join(", ")
                }
            ));
        }
        (None, Some(err)) => out.push_str(&format!("No platform: {}\n", err)),
        (None, None) => out.push_str("No platform\n"),
    }

    out
}

pub fn storage(registry: &PlatformRegistry, action: &StorageAction) -> Result<()> {
    let platform = registry
        .current()
        .ok_or_else(|| anyhow!("No platform was selected"))?;
    let storage: &dyn StorageService = platform
        .storage()
        .ok_or_else(|| anyhow!("Platform '{}' has no storage service", platform.info().id))?;

    match action {
        StorageAction::Put { key, value } => {
            storage.save(key, value.as_bytes())?;
            println!("Saved {}", key);
        }
        StorageAction::Get { key } => match storage.load(key)? {
            Some(data) => println!("{}", String::from_utf8_lossy(&data)),
            None => bail!("Key '{}' not found", key),
        },
        StorageAction::Delete { key } => {
            if storage.delete(key)? {
                println!("Deleted {}", key);
            } else {
                println!("Key '{}' was not stored", key);
            }
        }
        StorageAction::Keys => {
            for key in storage.keys()? {
                println!("{}", key);
            }
        }
    }
    Ok(())
}
