//! Producer Discovery Registry
//!
//! Compile-time registration of producers. A crate linked into the final
//! binary contributes producers by adding entries to the [`PRODUCERS`]
//! distributed slice; containers built with discovery enabled instantiate
//! every entry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Producer Registration Flow                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  1. Crate defines:   #[linkme::distributed_slice(PRODUCERS)] │
//! │                      static ENTRY: ProducerEntry = ...       │
//! │                              ↓                               │
//! │  2. Registry holds:  pub static PRODUCERS: [Entry] = [..]    │
//! │                              ↓                               │
//! │  3. Builder calls:   discovered_producers()                  │
//! │                              ↓                               │
//! │  4. Container:       producers ordered by priority           │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a Producer
//!
//! ```ignore
//! use depot_application::ports::registry::{ProducerEntry, PRODUCERS};
//!
//! #[linkme::distributed_slice(PRODUCERS)]
//! static MAILER: ProducerEntry = ProducerEntry {
//!     name: "mailer",
//!     description: "SMTP mailer",
//!     factory: || Ok(Arc::new(SingleIdentityProducer::new(mailer_engine()))),
//! };
//! ```

use std::sync::Arc;

use depot_domain::{Error, Result};
use tracing::debug;

use crate::ports::producer::Producer;

/// Registry entry for discovered producers
pub struct ProducerEntry {
    /// Unique entry name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the producer
    pub factory: fn() -> Result<Arc<dyn Producer>>,
}

// Auto-collection via linkme distributed slices - crates submit entries at compile time
#[linkme::distributed_slice]
pub static PRODUCERS: [ProducerEntry] = [..];

/// Entries of the registry, sorted by name
///
/// Link order of distributed slice entries is unspecified; sorting keeps
/// registration order, and thus tie-breaks, stable across builds.
fn sorted_entries() -> Vec<&'static ProducerEntry> {
    let mut entries: Vec<&'static ProducerEntry> = PRODUCERS.iter().collect();
    entries.sort_by_key(|entry| entry.name);
    entries
}

/// Instantiate every discovered producer
pub fn discovered_producers() -> Result<Vec<Arc<dyn Producer>>> {
    sorted_entries()
        .into_iter()
        .map(|entry| {
            debug!(producer = entry.name, "Instantiating discovered producer");
            (entry.factory)().map_err(|err| {
                Error::configuration(format!(
                    "discovered producer '{}' failed to initialize: {err}",
                    entry.name
                ))
            })
        })
        .collect()
}

/// Instantiate one discovered producer by name
pub fn resolve_producer(name: &str) -> Result<Arc<dyn Producer>> {
    if let Some(entry) = PRODUCERS.iter().find(|entry| entry.name == name) {
        return (entry.factory)();
    }

    let available: Vec<&str> = sorted_entries().iter().map(|e| e.name).collect();
    Err(Error::configuration(format!(
        "Unknown producer '{name}'. Available producers: {available:?}"
    )))
}

/// List all discovered producers
///
/// Returns `(name, description)` tuples sorted by name.
pub fn list_discovered_producers() -> Vec<(&'static str, &'static str)> {
    sorted_entries()
        .into_iter()
        .map(|e| (e.name, e.description))
        .collect()
}
