//! Local producer overlays
//!
//! Overlays hold producers, prebuilt components and activation values layered
//! on top of the regular registrations of a container, with the highest
//! precedence. They isolate tests from each other: register overrides in an
//! overlay, build containers from it, clear it when the test ends.
//!
//! - [`LocalProducers::thread_local`]: one overlay per thread
//! - [`LocalProducers::context_local`]: one overlay per name, process-wide
//!
//! Containers copy the overlay contents when they are built; later changes
//! to the overlay only affect containers built afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use dashmap::DashMap;
use depot_application::Producer;
use depot_domain::constants::DEACTIVATED_VALUE;
use depot_domain::{Identity, NamedComponent};
use tracing::debug;

thread_local! {
    static THREAD_LOCAL: LocalProducers = LocalProducers::new();
}

static CONTEXTS: LazyLock<DashMap<String, LocalProducers>> = LazyLock::new(DashMap::new);

#[derive(Default)]
struct LocalState {
    producers: Vec<Arc<dyn Producer>>,
    components: Vec<NamedComponent>,
    activation: BTreeMap<String, String>,
}

/// Contents of an overlay at one point in time
#[derive(Clone, Default)]
pub struct LocalSnapshot {
    /// Overriding producers, in registration order
    pub producers: Vec<Arc<dyn Producer>>,
    /// Overriding prebuilt components
    pub components: Vec<NamedComponent>,
    /// Overriding activation values
    pub activation: BTreeMap<String, String>,
}

/// Shared handle on a producer overlay
///
/// Clones share the same contents.
#[derive(Clone, Default)]
pub struct LocalProducers {
    state: Arc<RwLock<LocalState>>,
}

impl LocalProducers {
    /// A fresh overlay, not registered anywhere
    pub fn new() -> Self {
        Self::default()
    }

    /// The overlay of the current thread
    pub fn thread_local() -> Self {
        THREAD_LOCAL.with(Clone::clone)
    }

    /// The process-wide overlay registered under `name`
    pub fn context_local(name: &str) -> Self {
        CONTEXTS.entry(name.to_string()).or_default().clone()
    }

    /// Forget the process-wide overlay registered under `name`
    pub fn remove_context(name: &str) {
        if CONTEXTS.remove(name).is_some() {
            debug!(context = name, "Local context removed");
        }
    }

    /// Add an overriding producer
    pub fn add_producer(&self, producer: Arc<dyn Producer>) -> &Self {
        self.write().producers.push(producer);
        self
    }

    /// Serve a prebuilt component, replacing any previous one of the same identity
    pub fn set_component(&self, component: NamedComponent) -> &Self {
        let mut state = self.write();
        state
            .components
            .retain(|existing| existing.identity() != component.identity());
        state.components.push(component);
        self
    }

    /// Override an activation value
    pub fn set_activation(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.write().activation.insert(key.into(), value.into());
        self
    }

    /// Deactivate an identity
    pub fn deactivate(&self, identity: &Identity) -> &Self {
        self.set_activation(identity.activation_key(), DEACTIVATED_VALUE)
    }

    /// Remove every override
    pub fn clear(&self) {
        *self.write() = LocalState::default();
    }

    /// Whether the overlay holds nothing
    pub fn is_empty(&self) -> bool {
        let state = self.read();
        state.producers.is_empty() && state.components.is_empty() && state.activation.is_empty()
    }

    /// Guard clearing the overlay when dropped
    ///
    /// ```ignore
    /// let local = LocalProducers::thread_local();
    /// let _scope = local.scoped();
    /// local.set_component(NamedComponent::of(Identity::of::<String>("x"), "test".to_string()));
    /// // ... build containers and assert ...
    /// // overlay cleared here
    /// ```
    #[must_use = "the overlay is cleared as soon as the scope is dropped"]
    pub fn scoped(&self) -> LocalScope {
        LocalScope {
            overlay: self.clone(),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> LocalSnapshot {
        let state = self.read();
        LocalSnapshot {
            producers: state.producers.clone(),
            components: state.components.clone(),
            activation: state.activation.clone(),
        }
    }

    // Overlay state holds plain collections, a panic while holding the lock
    // cannot leave them half-updated
    fn read(&self) -> std::sync::RwLockReadGuard<'_, LocalState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, LocalState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears its overlay on drop
pub struct LocalScope {
    overlay: LocalProducers,
}

impl Drop for LocalScope {
    fn drop(&mut self) {
        self.overlay.clear();
    }
}
