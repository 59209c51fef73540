//! The platform initializer contract
//!
//! An initializer is a self-contained unit that knows how to bring up one
//! platform, or decline when that platform does not apply to the current
//! build or environment (SDK missing, disabled in config, wrong storefront).
//! Deciding applicability is the initializer's job; the registry only picks
//! the first one that succeeds.

use std::fmt;
use std::sync::Arc;

use crate::platform::Platform;

/// Error reported by an initializer that applies but could not start
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Platform SDK unavailable: {0}")]
    SdkUnavailable(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Result of asking an initializer for its platform
pub enum InitOutcome {
    /// The platform is up and ready to be used
    Ready(Arc<dyn Platform>),
    /// The initializer does not apply here
    Declined,
    /// The initializer applies but failed to start
    Failed(InitError),
}

impl InitOutcome {
    /// Shorthand for wrapping a concrete platform
    pub fn ready<P: Platform>(platform: P) -> Self {
        InitOutcome::Ready(Arc::new(platform))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, InitOutcome::Ready(_))
    }
}

impl fmt::Debug for InitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitOutcome::Ready(platform) => f
                .debug_tuple("Ready")
                .field(&platform.info().id)
                .finish(),
            InitOutcome::Declined => f.write_str("Declined"),
            InitOutcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

impl From<Result<Option<Arc<dyn Platform>>, InitError>> for InitOutcome {
    fn from(result: Result<Option<Arc<dyn Platform>>, InitError>) -> Self {
        match result {
            Ok(Some(platform)) => InitOutcome::Ready(platform),
            Ok(None) => InitOutcome::Declined,
            Err(err) => InitOutcome::Failed(err),
        }
    }
}

/// A candidate that can produce a platform or decline
///
/// Implementations are constructed with no arguments (through their
/// registered factory) once per discovery pass.
///
/// # Example
///
/// ```rust
/// use platform_core::{InitOutcome, Platform, PlatformInfo, PlatformInitializer};
///
/// #[derive(Debug)]
/// struct Headless;
///
/// impl Platform for Headless {
///     fn info(&self) -> PlatformInfo {
///         PlatformInfo::new("headless", "Headless")
///     }
/// }
///
/// #[derive(Default)]
/// struct HeadlessInitializer;
///
/// impl PlatformInitializer for HeadlessInitializer {
///     fn initialize(&self) -> InitOutcome {
///         if std::env::var_os("HEADLESS").is_none() {
///             return InitOutcome::Declined;
///         }
///         InitOutcome::ready(Headless)
///     }
/// }
/// ```
pub trait PlatformInitializer: Send {
    fn initialize(&self) -> InitOutcome;
}

/// Factory function type producing a fresh initializer instance
pub type InitializerFactory = fn() -> Box<dyn PlatformInitializer>;

/// A discovered candidate: a stable name plus the factory that builds it
#[derive(Clone)]
pub struct InitializerDescriptor {
    name: String,
    factory: InitializerFactory,
}

impl InitializerDescriptor {
    pub fn new(name: impl Into<String>, factory: InitializerFactory) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    /// Descriptor for a `Default` initializer type, named by its type path
    pub fn of<T>() -> Self
    where
        T: PlatformInitializer + Default + 'static,
    {
        fn build<T: PlatformInitializer + Default + 'static>() -> Box<dyn PlatformInitializer> {
            Box::new(T::default())
        }
        Self::new(std::any::type_name::<T>(), build::<T>)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> InitializerFactory {
        self.factory
    }

    /// Build a fresh initializer instance
    pub fn instantiate(&self) -> Box<dyn PlatformInitializer> {
        (self.factory)()
    }
}

impl fmt::Debug for InitializerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializerDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
