//! Filtered warehouse view

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use depot_application::{ComponentBox, StoredBox, Warehouse};
use depot_domain::{BoxPolicy, Error, Identity, NamedComponent, Result, TypeDescriptor};
use tracing::debug;

/// Read-only view of a parent warehouse hiding some identities and types
///
/// Used as a provider of a child container: everything the parent already
/// built is reused by reference, except the excluded entries, which the
/// child then builds fresh. The view never mutates the parent: check-in is
/// rejected, closing is a no-op, and only boundless boxes are handed out.
///
/// # Example
///
/// ```ignore
/// let view = FilteredWarehouse::new(parent.warehouse())
///     .excluding_identity(Identity::of::<Session>("session"));
/// let child = parent.child_builder().add_warehouse_provider(Arc::new(view)).build()?;
/// ```
pub struct FilteredWarehouse {
    id: String,
    parent: Arc<dyn Warehouse>,
    excluded_identities: HashSet<Identity>,
    excluded_types: Vec<TypeDescriptor>,
}

impl FilteredWarehouse {
    /// View of `parent` hiding nothing yet
    pub fn new(parent: Arc<dyn Warehouse>) -> Self {
        Self {
            id: format!("{}-filtered", parent.id()),
            parent,
            excluded_identities: HashSet::new(),
            excluded_types: Vec::new(),
        }
    }

    /// Hide one identity
    #[must_use]
    pub fn excluding_identity(mut self, identity: Identity) -> Self {
        self.excluded_identities.insert(identity);
        self
    }

    /// Hide every identity whose declared type is assignable to `target`
    #[must_use]
    pub fn excluding_type(mut self, target: TypeDescriptor) -> Self {
        self.excluded_types.push(target);
        self
    }

    /// Whether `identity` is hidden by this view
    pub fn is_excluded(&self, identity: &Identity) -> bool {
        self.excluded_identities.contains(identity)
            || self
                .excluded_types
                .iter()
                .any(|target| identity.declared_type().is_assignable_to(target))
    }
}

impl Warehouse for FilteredWarehouse {
    fn id(&self) -> &str {
        &self.id
    }

    fn providers(&self) -> Vec<Arc<dyn Warehouse>> {
        vec![Arc::clone(&self.parent)]
    }

    fn stored_box(&self, identity: &Identity) -> Option<StoredBox> {
        if self.is_excluded(identity) {
            return None;
        }
        self.parent.stored_box(identity)
    }

    fn check_out(&self, identity: &Identity) -> Option<NamedComponent> {
        let stored = self.stored_box(identity)?;
        if stored.component_box.policy() != BoxPolicy::Boundless {
            return None;
        }
        stored.component_box.pick()
    }

    fn check_in(
        &self,
        component_box: Arc<dyn ComponentBox>,
        _dependencies: Vec<Identity>,
        _build_duration: Duration,
    ) -> Result<()> {
        Err(Error::invalid_argument(format!(
            "warehouse {} is a read-only view, cannot check in {}",
            self.id,
            component_box.identity()
        )))
    }

    fn list_names(&self) -> Vec<Identity> {
        self.parent
            .list_names()
            .into_iter()
            .filter(|identity| !self.is_excluded(identity))
            .collect()
    }

    fn close(&self) {
        debug!(warehouse = %self.id, "Filtered view closed, parent left untouched");
    }
}
