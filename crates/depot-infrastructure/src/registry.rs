//! Process-wide container registry
//!
//! Only needed when code must find a container without holding a reference
//! to it, e.g. several independent server instances living in one process.
//! Containers are registered explicitly on start and unregistered on stop;
//! nothing is registered implicitly.

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::container::Container;

static CONTAINERS: LazyLock<DashMap<ContainerHandle, Arc<Container>>> =
    LazyLock::new(DashMap::new);

/// Opaque handle of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerHandle(Uuid);

impl ContainerHandle {
    /// A fresh, unique handle
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying uuid
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Registry of running containers keyed by handle
pub struct ContainerRegistry;

impl ContainerRegistry {
    /// Register a container under its own handle
    pub fn register(container: Arc<Container>) -> ContainerHandle {
        let handle = container.handle();
        info!(container = container.id(), %handle, "Container registered");
        CONTAINERS.insert(handle, container);
        handle
    }

    /// Container registered under `handle`
    pub fn get(handle: ContainerHandle) -> Option<Arc<Container>> {
        CONTAINERS.get(&handle).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove a container from the registry, returning it
    ///
    /// The container is not closed; its owner decides when to close it.
    pub fn unregister(handle: ContainerHandle) -> Option<Arc<Container>> {
        let removed = CONTAINERS.remove(&handle).map(|(_, container)| container);
        if let Some(container) = &removed {
            info!(container = container.id(), %handle, "Container unregistered");
        }
        removed
    }

    /// Handles of every registered container
    pub fn handles() -> Vec<ContainerHandle> {
        let mut handles: Vec<ContainerHandle> = CONTAINERS.iter().map(|e| *e.key()).collect();
        handles.sort();
        handles
    }
}
