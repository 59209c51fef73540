//! Platform metadata for diagnostics and tooling
//!
//! This module provides a descriptive record of a selected platform that
//! frontends, logs and the probe binary can display without touching the
//! platform's services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The sub-services a platform may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    User,
    Leaderboards,
    Achievements,
    Storage,
    Multiplayer,
}

impl ServiceKind {
    /// All service kinds in display order
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::User,
        ServiceKind::Leaderboards,
        ServiceKind::Achievements,
        ServiceKind::Storage,
        ServiceKind::Multiplayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::User => "user",
            ServiceKind::Leaderboards => "leaderboards",
            ServiceKind::Achievements => "achievements",
            ServiceKind::Storage => "storage",
            ServiceKind::Multiplayer => "multiplayer",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a platform for display and logging
///
/// This struct contains:
/// - A stable identifier (e.g., "steam", "local")
/// - A human-readable name (e.g., "Steam", "Local Profile")
/// - The version of the backing SDK, if any
/// - The services the platform advertises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Stable platform identifier
    pub id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Version of the backing SDK ("none" for SDK-less platforms)
    pub sdk_version: String,

    /// Services this platform advertises
    pub services: Vec<ServiceKind>,
}

impl PlatformInfo {
    /// Create a new PlatformInfo with required fields
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            sdk_version: "none".to_string(),
            services: Vec::new(),
        }
    }

    /// Builder method for the SDK version
    pub fn with_sdk_version(mut self, version: impl Into<String>) -> Self {
        self.sdk_version = version.into();
        self
    }

    /// Builder method adding an advertised service (duplicates are ignored)
    pub fn with_service(mut self, kind: ServiceKind) -> Self {
        if !self.services.contains(&kind) {
            self.services.push(kind);
        }
        self
    }

    /// Check whether the platform advertises a service
    pub fn supports(&self, kind: ServiceKind) -> bool {
        self.services.contains(&kind)
    }
}
