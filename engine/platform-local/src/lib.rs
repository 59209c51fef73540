//! Local/offline platform for the platform registry
//!
//! This crate provides a platform that needs no SDK: a local player profile
//! and file-backed save storage under the configured data directory. It is
//! the fallback for DRM-free and development builds and declines when
//! `local.enabled` is false.
//!
//! # Usage
//!
//! ```rust,no_run
//! use platform_local::register_local;
//!
//! // Make the local platform a discovery candidate
//! register_local();
//!
//! let platform = platform_core::current().expect("local platform should be available");
//! let storage = platform.storage().expect("local platform has storage");
//! storage.save("slot1", b"level=3").unwrap();
//! ```

mod profile;
mod storage;

pub use profile::LocalProfile;
pub use storage::FileStorage;

use std::sync::{Arc, Once};

use platform_config::{load_config, CentralConfig};
use platform_core::{
    InitError, InitOutcome, Platform, PlatformInfo, PlatformInitializer, ServiceKind,
    StorageService, UserService,
};
use tracing::{debug, error, info};

static REGISTER: Once = Once::new();

/// Register the local platform with the runtime initializer table
///
/// Safe to call multiple times; registration happens once.
pub fn register_local() {
    REGISTER.call_once(|| {
        if let Err(err) = platform_core::register_initializer!(LocalInitializer) {
            error!(error = %err, "Failed to register local platform");
        }
    });
}

/// Platform backed by the local filesystem
#[derive(Debug)]
pub struct LocalPlatform {
    profile: LocalProfile,
    storage: FileStorage,
}

impl LocalPlatform {
    /// Open the platform, creating the storage directory if needed
    pub fn open(config: &CentralConfig) -> Result<Self, InitError> {
        if config.local.profile_name.trim().is_empty() {
            return Err(InitError::Configuration(
                "local.profile_name cannot be empty".into(),
            ));
        }

        let storage = FileStorage::open(config.local_storage_path())?;
        info!(
            profile = %config.local.profile_name,
            storage = %storage.root().display(),
            "Local platform opened"
        );

        Ok(Self {
            profile: LocalProfile::new(&config.local.profile_name),
            storage,
        })
    }
}

impl Platform for LocalPlatform {
    fn info(&self) -> PlatformInfo {
        PlatformInfo::new("local", "Local Profile")
            .with_service(ServiceKind::User)
            .with_service(ServiceKind::Storage)
    }

    fn user(&self) -> Option<&dyn UserService> {
        Some(&self.profile)
    }

    fn storage(&self) -> Option<&dyn StorageService> {
        Some(&self.storage)
    }
}

/// Initializer for `LocalPlatform`
///
/// Reads the central configuration when asked to initialize unless one was
/// supplied with `with_config`.
#[derive(Debug, Default)]
pub struct LocalInitializer {
    config: Option<CentralConfig>,
}

impl LocalInitializer {
    pub fn with_config(config: CentralConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl PlatformInitializer for LocalInitializer {
    fn initialize(&self) -> InitOutcome {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => load_config(),
        };

        let opened = if config.local.enabled {
            LocalPlatform::open(&config)
                .map(|platform| Some(Arc::new(platform) as Arc<dyn Platform>))
        } else {
            debug!("Local platform disabled by configuration");
            Ok(None)
        };
        opened.into()
    }
}
