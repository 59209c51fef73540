//! Initializer registration for platform discovery
//!
//! Platform initializers are never found by inspecting types at runtime.
//! Instead each one is entered into a registration table, and a discovery
//! pass enumerates those tables:
//!
//! - the runtime table, filled by `register_initializer` (or the
//!   `register_initializer!` macro) during startup,
//! - link-time entries submitted with `submit_initializer!`, collected by
//!   `inventory` from every crate linked into the binary,
//! - explicit lists (`StaticInitializers`) handed to a catalog directly.
//!
//! Only factory functions of type `fn() -> Box<dyn PlatformInitializer>` can
//! be registered, so nothing but initializers ever becomes a candidate.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::initializer::{InitializerDescriptor, InitializerFactory};

/// Thread-safe runtime table mapping initializer names to factories
static REGISTRY: Lazy<Mutex<HashMap<String, InitializerFactory>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn table() -> MutexGuard<'static, HashMap<String, InitializerFactory>> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Error returned when a registration is rejected
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Initializer name must not be empty")]
    EmptyName,
}

/// Error returned by a registration source that could not be enumerated
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to enumerate initializers from '{source_label}': {reason}")]
    Enumeration {
        source_label: String,
        reason: String,
    },
}

/// Register an initializer with the runtime table
///
/// Registering a name that already exists replaces the previous factory.
/// Initializers registered after a discovery pass are picked up by the next
/// pass (after `reset`).
///
/// # Example
///
/// ```rust
/// # use platform_core::registry::*;
/// # use platform_core::{InitOutcome, PlatformInitializer};
/// struct SteamInitializer;
///
/// impl PlatformInitializer for SteamInitializer {
///     fn initialize(&self) -> InitOutcome {
///         // No SDK in this build
///         InitOutcome::Declined
///     }
/// }
///
/// fn steam_factory() -> Box<dyn PlatformInitializer> {
///     Box::new(SteamInitializer)
/// }
///
/// register_initializer("platform_steam::SteamInitializer", steam_factory).unwrap();
/// assert!(is_registered("platform_steam::SteamInitializer"));
/// ```
pub fn register_initializer(
    name: impl Into<String>,
    factory: InitializerFactory,
) -> Result<(), RegistrationError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(RegistrationError::EmptyName);
    }

    let mut registry = table();
    if registry.contains_key(&name) {
        warn!(initializer = %name, "Overriding existing initializer registration");
    } else {
        debug!(initializer = %name, "Registered platform initializer");
    }
    registry.insert(name, factory);
    Ok(())
}

/// Remove an initializer from the runtime table
///
/// Returns `true` if it was registered. Link-time entries cannot be removed;
/// exclude them through the catalog instead.
pub fn unregister_initializer(name: &str) -> bool {
    table().remove(name).is_some()
}

/// Check if an initializer is registered, either at runtime or at link time
pub fn is_registered(name: &str) -> bool {
    table().contains_key(name) || linked_entries().any(|entry| entry.name == name)
}

/// Get the sorted list of all registered initializer names
///
/// Covers both the runtime table and link-time entries. The sort is for
/// display only; discovery does not visit candidates in this order.
pub fn list_registered_initializers() -> Vec<String> {
    let mut names: Vec<String> = table().keys().cloned().collect();
    names.extend(linked_entries().map(|entry| entry.name.to_string()));
    names.sort();
    names.dedup();
    names
}

/// Clear the runtime table (mainly for testing)
pub fn clear_registry() {
    table().clear();
}

/// Link-time registration entry collected by `inventory`
///
/// Use the `submit_initializer!` macro rather than building this directly.
pub struct LinkedInitializer {
    pub name: &'static str,
    pub factory: InitializerFactory,
}

inventory::collect!(LinkedInitializer);

fn linked_entries() -> impl Iterator<Item = &'static LinkedInitializer> {
    inventory::iter::<LinkedInitializer>.into_iter()
}

/// Register a `Default` initializer type with the runtime table
///
/// The type path (`std::any::type_name`) becomes the initializer name.
///
/// ```ignore
/// register_initializer!(LocalInitializer);
/// ```
#[macro_export]
macro_rules! register_initializer {
    ($init_type:ty) => {{
        let descriptor = $crate::initializer::InitializerDescriptor::of::<$init_type>();
        $crate::registry::register_initializer(
            descriptor.name().to_string(),
            descriptor.factory(),
        )
    }};
}

/// Submit a `Default` initializer type for link-time registration
///
/// Invoke at item level in the module that defines the type; the name is
/// `module_path!()::Type`, matching what `register_initializer!` produces.
///
/// ```ignore
/// submit_initializer!(SteamInitializer);
/// ```
#[macro_export]
macro_rules! submit_initializer {
    ($init_type:ident) => {
        $crate::inventory::submit! {
            $crate::registry::LinkedInitializer {
                name: concat!(module_path!(), "::", stringify!($init_type)),
                factory: {
                    fn factory(
                    ) -> ::std::boxed::Box<dyn $crate::initializer::PlatformInitializer> {
                        ::std::boxed::Box::new(
                            <$init_type as ::std::default::Default>::default(),
                        )
                    }
                    factory
                },
            }
        }
    };
}

/// Somewhere initializer candidates can be enumerated from
pub trait InitializerSource: Send + Sync {
    /// Short label used in diagnostics
    fn label(&self) -> &str;

    /// List the candidates this source currently holds
    fn enumerate(&self) -> Result<Vec<InitializerDescriptor>, SourceError>;
}

/// The process-wide runtime table
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisteredInitializers;

impl InitializerSource for RegisteredInitializers {
    fn label(&self) -> &str {
        "runtime"
    }

    fn enumerate(&self) -> Result<Vec<InitializerDescriptor>, SourceError> {
        Ok(table()
            .iter()
            .map(|(name, factory)| InitializerDescriptor::new(name.clone(), *factory))
            .collect())
    }
}

/// Entries submitted at link time with `submit_initializer!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedInitializers;

impl InitializerSource for LinkedInitializers {
    fn label(&self) -> &str {
        "linked"
    }

    fn enumerate(&self) -> Result<Vec<InitializerDescriptor>, SourceError> {
        Ok(linked_entries()
            .map(|entry| InitializerDescriptor::new(entry.name, entry.factory))
            .collect())
    }
}

/// An explicit, ordered list of candidates
#[derive(Debug, Clone)]
pub struct StaticInitializers {
    label: String,
    entries: Vec<InitializerDescriptor>,
}

impl StaticInitializers {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Builder method appending a named factory
    pub fn with(mut self, name: impl Into<String>, factory: InitializerFactory) -> Self {
        self.entries.push(InitializerDescriptor::new(name, factory));
        self
    }

    /// Builder method appending a descriptor
    pub fn with_descriptor(mut self, descriptor: InitializerDescriptor) -> Self {
        self.entries.push(descriptor);
        self
    }
}

impl InitializerSource for StaticInitializers {
    fn label(&self) -> &str {
        &self.label
    }

    fn enumerate(&self) -> Result<Vec<InitializerDescriptor>, SourceError> {
        Ok(self.entries.clone())
    }
}

/// The set of sources a discovery pass enumerates, plus names to skip
#[derive(Clone, Default)]
pub struct InitializerCatalog {
    sources: Vec<Arc<dyn InitializerSource>>,
    excluded: HashSet<String>,
}

impl InitializerCatalog {
    /// An empty catalog with no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// The runtime table followed by link-time entries
    pub fn global() -> Self {
        Self::new()
            .with_source(RegisteredInitializers)
            .with_source(LinkedInitializers)
    }

    /// Builder method appending a source
    pub fn with_source<S: InitializerSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Builder method adding names that discovery skips
    pub fn with_excluded<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn sources(&self) -> &[Arc<dyn InitializerSource>] {
        &self.sources
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }
}

impl fmt::Debug for InitializerCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.sources.iter().map(|s| s.label()).collect();
        f.debug_struct("InitializerCatalog")
            .field("sources", &labels)
            .field("excluded", &self.excluded)
            .finish()
    }
}
