//! Core traits and runtime discovery for gaming platforms
//!
//! This crate provides the abstractions that put platform SDKs behind one
//! interface and pick the right one at runtime:
//! - `Platform`: Bundle of user, leaderboard, achievement, storage and
//!   multiplayer services
//! - `PlatformInitializer`: Produces a platform or declines
//! - `registry`: Registration table of initializers (runtime and link time)
//! - `discovery`: One pass that selects the first initializer that succeeds
//! - `PlatformRegistry`: Caches the selected platform behind `current()`

pub mod discovery;
pub mod initializer;
pub mod manager;
pub mod metadata;
pub mod platform;
pub mod registry;
pub mod services;
pub mod types;

// Re-export main types for convenience
pub use discovery::{
    discover, AttemptStatus, CandidateAttempt, CandidateError, Discovered, DiscoveryError,
    DiscoveryReport,
};
pub use initializer::{
    InitError, InitOutcome, InitializerDescriptor, InitializerFactory, PlatformInitializer,
};
pub use manager::{
    current, global, initialize, install_catalog, is_initialized, reset, set_platform,
    CatalogInstallError, PlatformRegistry,
};
pub use metadata::{PlatformInfo, ServiceKind};
pub use platform::Platform;
pub use registry::{
    clear_registry, is_registered, list_registered_initializers, register_initializer,
    unregister_initializer, InitializerCatalog, InitializerSource, RegistrationError,
    SourceError, StaticInitializers,
};
pub use services::{
    AchievementService, LeaderboardService, MultiplayerService, ServiceError, StorageService,
    UserService,
};
pub use types::{Achievement, LeaderboardEntry, SessionId, User};

#[doc(hidden)]
pub use inventory;
