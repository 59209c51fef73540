//! The discovery pass
//!
//! One pass enumerates every source of a catalog, drops excluded and
//! duplicate names, and then asks each candidate in turn for a platform. The
//! first candidate that returns one wins and no further candidates are
//! constructed. Nothing in here returns an error to the caller: every
//! failure is logged and recorded in the `DiscoveryReport`.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::initializer::{InitError, InitOutcome, InitializerDescriptor};
use crate::platform::Platform;
use crate::registry::{InitializerCatalog, SourceError};

/// Why a discovery pass ended without a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscoveryError {
    #[error("No platform initializers were found")]
    Empty,
    #[error("None of the {candidates} platform initializer(s) produced a platform")]
    Exhausted { candidates: usize },
}

/// Why a single candidate did not produce a platform
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("Initializer '{name}' panicked: {message}")]
    Panicked { name: String, message: String },
    #[error("Initializer '{name}' failed: {source}")]
    Failed {
        name: String,
        #[source]
        source: InitError,
    },
}

/// What happened when a candidate was tried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptStatus {
    Selected { platform_id: String },
    Declined,
    Failed { reason: String },
}

/// One tried candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAttempt {
    pub initializer: String,
    #[serde(flatten)]
    pub status: AttemptStatus,
}

/// Diagnostics gathered during one discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Candidate names in the order they were visited
    pub candidates: Vec<String>,
    /// Names dropped because the catalog excludes them
    pub excluded: Vec<String>,
    /// Sources that could not be enumerated
    pub skipped_sources: Vec<String>,
    /// Candidates that were actually constructed, in order
    pub attempts: Vec<CandidateAttempt>,
    /// Name of the initializer whose platform was selected
    pub selected: Option<String>,
    pub error: Option<DiscoveryError>,
}

impl DiscoveryReport {
    pub fn succeeded(&self) -> bool {
        self.selected.is_some()
    }
}

/// Result of a discovery pass: the platform (if any) plus its report
#[derive(Debug)]
pub struct Discovered {
    pub platform: Option<Arc<dyn Platform>>,
    pub report: DiscoveryReport,
}

/// Run one full discovery pass over a catalog
pub fn discover(catalog: &InitializerCatalog) -> Discovered {
    let mut report = DiscoveryReport::default();
    let candidates = collect_candidates(catalog, &mut report);

    if candidates.is_empty() {
        let err = DiscoveryError::Empty;
        error!(error = %err, "Platform discovery failed");
        report.error = Some(err);
        return Discovered {
            platform: None,
            report,
        };
    }

    report.candidates = candidates.iter().map(|d| d.name().to_string()).collect();
    info!(
        count = candidates.len(),
        candidates = ?report.candidates,
        "Found platform initializer candidates"
    );
    if candidates.len() > 1 {
        warn!(
            count = candidates.len(),
            "Multiple platform initializers found; the order they are tried in is unspecified"
        );
    }

    for descriptor in &candidates {
        let name = descriptor.name().to_string();
        match try_candidate(descriptor) {
            Ok(Some(platform)) => {
                let platform_id = platform.info().id;
                info!(initializer = %name, platform = %platform_id, "Platform initialized");
                report.attempts.push(CandidateAttempt {
                    initializer: name.clone(),
                    status: AttemptStatus::Selected { platform_id },
                });
                report.selected = Some(name);
                return Discovered {
                    platform: Some(platform),
                    report,
                };
            }
            Ok(None) => {
                info!(initializer = %name, "Platform initializer declined");
                report.attempts.push(CandidateAttempt {
                    initializer: name,
                    status: AttemptStatus::Declined,
                });
            }
            Err(err) => {
                warn!(initializer = %name, error = %err, "Platform initializer failed");
                report.attempts.push(CandidateAttempt {
                    initializer: name,
                    status: AttemptStatus::Failed {
                        reason: err.to_string(),
                    },
                });
            }
        }
    }

    let err = DiscoveryError::Exhausted {
        candidates: candidates.len(),
    };
    error!(error = %err, "Platform discovery failed");
    report.error = Some(err);
    Discovered {
        platform: None,
        report,
    }
}

fn collect_candidates(
    catalog: &InitializerCatalog,
    report: &mut DiscoveryReport,
) -> Vec<InitializerDescriptor> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for source in catalog.sources() {
        let label = source.label().to_string();
        let entries = panic::catch_unwind(AssertUnwindSafe(|| source.enumerate()))
            .unwrap_or_else(|payload| {
                Err(SourceError::Enumeration {
                    source_label: label.clone(),
                    reason: panic_message(payload.as_ref()),
                })
            });

        let entries = match entries {
            Ok(entries) => entries,
            Err(err) => {
                debug!(source = %label, error = %err, "Skipping initializer source");
                report.skipped_sources.push(err.to_string());
                continue;
            }
        };

        for descriptor in entries {
            let name = descriptor.name();
            if catalog.is_excluded(name) {
                debug!(initializer = %name, "Initializer excluded by configuration");
                report.excluded.push(name.to_string());
                continue;
            }
            if !seen.insert(name.to_string()) {
                warn!(
                    initializer = %name,
                    source = %label,
                    "Initializer registered by more than one source; keeping the first"
                );
                continue;
            }
            candidates.push(descriptor);
        }
    }

    candidates
}

/// Construct one candidate and ask it for a platform
///
/// `Ok(None)` means the candidate declined.
fn try_candidate(
    descriptor: &InitializerDescriptor,
) -> Result<Option<Arc<dyn Platform>>, CandidateError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let initializer = descriptor.instantiate();
        initializer.initialize()
    }))
    .map_err(|payload| CandidateError::Panicked {
        name: descriptor.name().to_string(),
        message: panic_message(payload.as_ref()),
    })?;

    match outcome {
        InitOutcome::Ready(platform) => Ok(Some(platform)),
        InitOutcome::Declined => Ok(None),
        InitOutcome::Failed(source) => Err(CandidateError::Failed {
            name: descriptor.name().to_string(),
            source,
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
