//! Standard warehouse

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use depot_application::{ComponentBox, StoredBox, Warehouse};
use depot_domain::{BoxPolicy, Identity, NamedComponent, Result};
use tracing::{debug, warn};

/// Concurrent warehouse owned by a single container
///
/// Lookups missing the own boxes fall back to the provider warehouses, in
/// order. Closing only ever touches the own boxes.
pub struct StdWarehouse {
    id: String,
    boxes: DashMap<Identity, StoredBox>,
    sequence: AtomicU64,
    providers: Vec<Arc<dyn Warehouse>>,
}

impl StdWarehouse {
    /// Create an empty warehouse without providers
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_providers(id, Vec::new())
    }

    /// Create an empty warehouse chaining `providers`
    pub fn with_providers(id: impl Into<String>, providers: Vec<Arc<dyn Warehouse>>) -> Self {
        Self {
            id: id.into(),
            boxes: DashMap::new(),
            sequence: AtomicU64::new(0),
            providers,
        }
    }

    /// Number of boxes held by this warehouse
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether this warehouse holds no box
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    fn own_boxes_by_sequence(&self) -> Vec<StoredBox> {
        let mut stored: Vec<StoredBox> = self.boxes.iter().map(|e| e.value().clone()).collect();
        stored.sort_by_key(|s| s.sequence);
        stored
    }

    fn check_out_own(&self, identity: &Identity) -> Option<NamedComponent> {
        if let Some((_, stored)) = self.boxes.remove_if(identity, |_, stored| {
            stored.component_box.policy() == BoxPolicy::Disposable
        }) {
            debug!(warehouse = %self.id, %identity, "Disposable box checked out");
            return stored.component_box.pick();
        }
        // Clone the box handle so no shard lock is held while picking
        let component_box = self
            .boxes
            .get(identity)
            .map(|entry| Arc::clone(&entry.component_box))?;
        component_box.pick()
    }
}

impl Warehouse for StdWarehouse {
    fn id(&self) -> &str {
        &self.id
    }

    fn providers(&self) -> Vec<Arc<dyn Warehouse>> {
        self.providers.clone()
    }

    fn stored_box(&self, identity: &Identity) -> Option<StoredBox> {
        if let Some(stored) = self.boxes.get(identity) {
            return Some(stored.value().clone());
        }
        self.providers
            .iter()
            .find_map(|provider| provider.stored_box(identity))
    }

    fn check_out(&self, identity: &Identity) -> Option<NamedComponent> {
        if let Some(component) = self.check_out_own(identity) {
            return Some(component);
        }
        self.providers
            .iter()
            .find_map(|provider| provider.check_out(identity))
    }

    fn check_in(
        &self,
        component_box: Arc<dyn ComponentBox>,
        dependencies: Vec<Identity>,
        build_duration: Duration,
    ) -> Result<()> {
        let identity = component_box.identity().clone();
        let stored = StoredBox {
            component_box,
            dependencies,
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
            build_duration,
        };
        debug!(
            warehouse = %self.id,
            %identity,
            sequence = stored.sequence,
            "Box checked in"
        );
        if let Some(previous) = self.boxes.insert(identity.clone(), stored)
            && let Err(err) = previous.component_box.close()
        {
            warn!(warehouse = %self.id, %identity, error = %err, "Failed to close replaced box");
        }
        Ok(())
    }

    fn list_names(&self) -> Vec<Identity> {
        self.own_boxes_by_sequence()
            .into_iter()
            .map(|stored| stored.component_box.identity().clone())
            .collect()
    }

    fn close(&self) {
        let mut stored = self.own_boxes_by_sequence();
        self.boxes.clear();
        stored.reverse();
        debug!(warehouse = %self.id, boxes = stored.len(), "Closing warehouse");
        for entry in stored {
            let identity = entry.component_box.identity().clone();
            if let Err(err) = entry.component_box.close() {
                warn!(warehouse = %self.id, %identity, error = %err, "Failed to close component");
            }
        }
    }
}

impl std::fmt::Debug for StdWarehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdWarehouse")
            .field("id", &self.id)
            .field("boxes", &self.boxes.len())
            .field(
                "providers",
                &self.providers.iter().map(|p| p.id().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
