//! Platform registry: holds the selected platform and runs discovery lazily
//!
//! `PlatformRegistry` owns the state machine described by three operations:
//! `initialize` (discover once), `set_platform` (manual override) and `reset`
//! (forget and allow rediscovery). `current` initializes on first use.
//!
//! A process-wide instance is reachable through the free functions at the
//! bottom of this module. It uses the catalog given to `install_catalog`, or
//! `InitializerCatalog::global()` when none was installed. Tests and
//! embedders can build their own instances over any catalog.

use once_cell::sync::{Lazy, OnceCell};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::discovery::{discover, DiscoveryReport};
use crate::platform::Platform;
use crate::registry::InitializerCatalog;

/// Mutable registry state
///
/// `initialized` implies `current.is_some()`.
#[derive(Debug, Default)]
struct RegistryState {
    current: Option<Arc<dyn Platform>>,
    initialized: bool,
    last_report: Option<DiscoveryReport>,
}

/// Selects and caches the active platform
///
/// # Example
///
/// ```rust
/// use platform_core::registry::{InitializerCatalog, StaticInitializers};
/// use platform_core::{InitOutcome, Platform, PlatformInfo, PlatformInitializer, PlatformRegistry};
///
/// #[derive(Debug)]
/// struct Offline;
///
/// impl Platform for Offline {
///     fn info(&self) -> PlatformInfo {
///         PlatformInfo::new("offline", "Offline")
///     }
/// }
///
/// struct OfflineInitializer;
///
/// impl PlatformInitializer for OfflineInitializer {
///     fn initialize(&self) -> InitOutcome {
///         InitOutcome::ready(Offline)
///     }
/// }
///
/// fn offline() -> Box<dyn PlatformInitializer> {
///     Box::new(OfflineInitializer)
/// }
///
/// let catalog = InitializerCatalog::new()
///     .with_source(StaticInitializers::new("builtin").with("offline", offline));
/// let registry = PlatformRegistry::new(catalog);
///
/// let platform = registry.current().expect("offline platform should be selected");
/// assert_eq!(platform.info().id, "offline");
/// assert!(registry.is_initialized());
/// ```
#[derive(Debug)]
pub struct PlatformRegistry {
    catalog: InitializerCatalog,
    state: Mutex<RegistryState>,
}

impl PlatformRegistry {
    /// Create an uninitialized registry over a catalog
    pub fn new(catalog: InitializerCatalog) -> Self {
        Self {
            catalog,
            state: Mutex::new(RegistryState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn catalog(&self) -> &InitializerCatalog {
        &self.catalog
    }

    /// The active platform, running discovery first if needed
    ///
    /// Returns `None` when discovery found nothing usable; the reason is
    /// available from `last_report` and the logs.
    pub fn current(&self) -> Option<Arc<dyn Platform>> {
        let mut state = self.state();
        if !state.initialized {
            self.run_discovery(&mut state);
        }
        state.current.clone()
    }

    /// The active platform without triggering discovery
    pub fn peek(&self) -> Option<Arc<dyn Platform>> {
        self.state().current.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    /// Run a discovery pass unless a platform is already active
    ///
    /// Calling this while initialized does nothing. The state lock is held
    /// for the whole pass, so concurrent callers discover at most once.
    /// Initializers must not call back into the same registry.
    pub fn initialize(&self) {
        let mut state = self.state();
        if state.initialized {
            return;
        }
        self.run_discovery(&mut state);
    }

    fn run_discovery(&self, state: &mut RegistryState) {
        debug!(catalog = ?self.catalog, "Starting platform discovery");
        let discovered = discover(&self.catalog);

        if let Some(platform) = discovered.platform {
            state.current = Some(platform);
            state.initialized = true;
        }
        state.last_report = Some(discovered.report);
    }

    /// Install a platform directly, without discovery
    ///
    /// Replaces whatever is active, whether or not discovery has run.
    pub fn set_platform(&self, platform: Arc<dyn Platform>) {
        let mut state = self.state();
        info!(platform = %platform.info().id, "Platform set manually");
        state.current = Some(platform);
        state.initialized = true;
    }

    /// Forget the active platform so the next access rediscovers
    pub fn reset(&self) {
        let mut state = self.state();
        state.current = None;
        state.initialized = false;
        debug!("Platform registry reset");
    }

    /// Report of the most recent discovery pass, if one has run
    pub fn last_report(&self) -> Option<DiscoveryReport> {
        self.state().last_report.clone()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new(InitializerCatalog::global())
    }
}

/// Returned by `install_catalog` once the process-wide registry exists
#[derive(Debug, thiserror::Error)]
#[error("The process-wide registry was already created with another catalog")]
pub struct CatalogInstallError(pub InitializerCatalog);

/// Catalog the process-wide registry is built from
static GLOBAL_CATALOG: OnceCell<InitializerCatalog> = OnceCell::new();

/// The process-wide registry, over `GLOBAL_CATALOG` or the global sources
static GLOBAL: Lazy<PlatformRegistry> = Lazy::new(|| {
    let catalog = GLOBAL_CATALOG.get_or_init(InitializerCatalog::global);
    PlatformRegistry::new(catalog.clone())
});

/// Choose the catalog behind the process-wide registry
///
/// Must run before the first use of `global()` or the free functions, e.g.
/// to apply the configured `registry.excluded` names. Afterwards the catalog
/// is fixed and the rejected one is handed back.
pub fn install_catalog(catalog: InitializerCatalog) -> Result<(), CatalogInstallError> {
    GLOBAL_CATALOG.set(catalog).map_err(CatalogInstallError)?;
    debug!(catalog = ?GLOBAL_CATALOG.get(), "Installed process-wide catalog");
    Ok(())
}

/// Access the process-wide registry
pub fn global() -> &'static PlatformRegistry {
    &GLOBAL
}

/// The active platform of the process-wide registry
pub fn current() -> Option<Arc<dyn Platform>> {
    GLOBAL.current()
}

pub fn is_initialized() -> bool {
    GLOBAL.is_initialized()
}

pub fn initialize() {
    GLOBAL.initialize()
}

pub fn set_platform(platform: Arc<dyn Platform>) {
    GLOBAL.set_platform(platform)
}

pub fn reset() {
    GLOBAL.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initializer::{InitOutcome, PlatformInitializer};
    use crate::metadata::PlatformInfo;
    use crate::registry::{clear_registry, register_initializer, StaticInitializers};
    use crate::test_utils::REGISTRY_TEST_MUTEX;

    #[derive(Debug)]
    struct NamedPlatform(&'static str);

    impl Platform for NamedPlatform {
        fn info(&self) -> PlatformInfo {
            PlatformInfo::new(self.0, self.0)
        }
    }

    struct ReadyInitializer;

    impl PlatformInitializer for ReadyInitializer {
        fn initialize(&self) -> InitOutcome {
            InitOutcome::ready(NamedPlatform("ready"))
        }
    }

    fn ready() -> Box<dyn PlatformInitializer> {
        Box::new(ReadyInitializer)
    }

    fn registry_with_ready() -> PlatformRegistry {
        let source = StaticInitializers::new("test").with("ready", ready);
        PlatformRegistry::new(InitializerCatalog::new().with_source(source))
    }

    #[test]
    fn test_new_registry_is_uninitialized() {
        let registry = registry_with_ready();
        assert!(!registry.is_initialized());
        assert!(registry.last_report().is_none());
    }

    #[test]
    fn test_current_initializes_lazily() {
        let registry = registry_with_ready();
        let platform = registry.current().unwrap();
        assert_eq!(platform.info().id, "ready");
        assert!(registry.is_initialized());
        assert_eq!(
            registry.last_report().unwrap().selected.as_deref(),
            Some("ready")
        );
    }

    #[test]
    fn test_current_returns_same_handle_until_reset() {
        let registry = registry_with_ready();
        let first = registry.current().unwrap();
        let second = registry.current().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        registry.reset();
        let third = registry.current().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_peek_never_runs_discovery() {
        let registry = registry_with_ready();
        assert!(registry.peek().is_none());
        assert!(registry.last_report().is_none());

        registry.initialize();
        let peeked = registry.peek().unwrap();
        assert!(Arc::ptr_eq(&peeked, &registry.current().unwrap()));
    }

    #[test]
    fn test_set_platform_without_discovery() {
        let registry = PlatformRegistry::new(InitializerCatalog::new());
        let manual: Arc<dyn Platform> = Arc::new(NamedPlatform("manual"));

        registry.set_platform(Arc::clone(&manual));

        assert!(registry.is_initialized());
        assert!(Arc::ptr_eq(&registry.current().unwrap(), &manual));
        assert!(registry.last_report().is_none());
    }

    #[test]
    fn test_failed_discovery_keeps_registry_uninitialized() {
        let registry = PlatformRegistry::new(InitializerCatalog::new());
        assert!(registry.current().is_none());
        assert!(!registry.is_initialized());
        assert!(!registry.last_report().unwrap().succeeded());
    }

    #[test]
    fn test_concurrent_first_access_discovers_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static BUILT: AtomicUsize = AtomicUsize::new(0);

        fn counting() -> Box<dyn PlatformInitializer> {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Box::new(ReadyInitializer)
        }

        let registry = Arc::new(PlatformRegistry::new(
            InitializerCatalog::new()
                .with_source(StaticInitializers::new("test").with("counting", counting)),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.current().map(|p| p.info().id))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("ready"));
        }
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_global_registry_uses_runtime_table() {
        let _guard = REGISTRY_TEST_MUTEX.lock().unwrap();
        clear_registry();
        reset();

        assert!(current().is_none());
        assert!(!is_initialized());

        register_initializer("ready", ready).unwrap();
        // Still uninitialized until asked again
        assert!(!is_initialized());

        initialize();
        assert!(is_initialized());
        assert_eq!(current().unwrap().info().id, "ready");

        let manual: Arc<dyn Platform> = Arc::new(NamedPlatform("override"));
        set_platform(Arc::clone(&manual));
        assert!(Arc::ptr_eq(&current().unwrap(), &manual));

        reset();
        clear_registry();
        assert!(current().is_none());
        assert!(std::ptr::eq(global(), global()));
    }
}
