//! Memoized activation reads

use std::sync::Arc;

use dashmap::DashMap;
use depot_application::ActivationSource;
use depot_domain::Identity;
use depot_domain::constants::DEACTIVATED_VALUE;

/// Activation values as seen by one container
///
/// Every key is read from the underlying source at most once, so a
/// container keeps resolving the same way for its whole lifetime even if
/// the environment changes.
pub struct ActivationSnapshot {
    source: Arc<dyn ActivationSource>,
    values: DashMap<String, Option<String>>,
}

impl ActivationSnapshot {
    /// Snapshot over `source`
    pub fn new(source: Arc<dyn ActivationSource>) -> Self {
        Self {
            source,
            values: DashMap::new(),
        }
    }

    /// Value of `key`, read once
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.values.get(key) {
            return value.value().clone();
        }
        let value = self.source.get(key);
        self.values
            .entry(key.to_string())
            .or_insert(value)
            .value()
            .clone()
    }

    /// Whether the activation key of `identity` reads `"false"`
    pub fn is_deactivated(&self, identity: &Identity) -> bool {
        self.get(&identity.activation_key())
            .is_some_and(|value| value == DEACTIVATED_VALUE)
    }

    /// Description of the underlying source
    pub fn describe(&self) -> String {
        self.source.describe()
    }
}

impl std::fmt::Debug for ActivationSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationSnapshot")
            .field("source", &self.source.describe())
            .field("cached", &self.values.len())
            .finish()
    }
}
