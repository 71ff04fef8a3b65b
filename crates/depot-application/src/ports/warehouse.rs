//! Warehouse port

use std::sync::Arc;
use std::time::Duration;

use depot_domain::{Identity, NamedComponent, Result};

use super::component_box::ComponentBox;

/// A box checked into a warehouse, with its build metadata
#[derive(Clone)]
pub struct StoredBox {
    /// The stored box
    pub component_box: Arc<dyn ComponentBox>,
    /// Identities the component was built from
    pub dependencies: Vec<Identity>,
    /// Position in the warehouse build order
    pub sequence: u64,
    /// Time spent building the component
    pub build_duration: Duration,
}

impl std::fmt::Debug for StoredBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredBox")
            .field("identity", self.component_box.identity())
            .field("policy", &self.component_box.policy())
            .field("dependencies", &self.dependencies)
            .field("sequence", &self.sequence)
            .field("build_duration", &self.build_duration)
            .finish()
    }
}

/// Store of built component boxes
///
/// Warehouses must be safe for concurrent checkout and check-in. A warehouse
/// may chain provider warehouses: lookups that miss its own boxes fall back
/// to its providers in order, but listings only report its own boxes.
pub trait Warehouse: Send + Sync {
    /// Identifier used in dumps and logs
    fn id(&self) -> &str;

    /// Provider warehouses consulted after this one
    fn providers(&self) -> Vec<Arc<dyn Warehouse>>;

    /// Stored box for `identity`, own or inherited, without checking it out
    fn stored_box(&self, identity: &Identity) -> Option<StoredBox>;

    /// Take the component stored for `identity`
    ///
    /// Disposable boxes are removed on checkout, boundless ones retained.
    fn check_out(&self, identity: &Identity) -> Option<NamedComponent>;

    /// Store a box, replacing (and closing) any previous box of the same identity
    fn check_in(
        &self,
        component_box: Arc<dyn ComponentBox>,
        dependencies: Vec<Identity>,
        build_duration: Duration,
    ) -> Result<()>;

    /// Identities of the boxes held by this warehouse
    fn list_names(&self) -> Vec<Identity>;

    /// Dependencies recorded for `identity`
    fn list_dependencies(&self, identity: &Identity) -> Vec<Identity> {
        self.stored_box(identity)
            .map(|stored| stored.dependencies)
            .unwrap_or_default()
    }

    /// Close every box owned by this warehouse, in reverse build order
    fn close(&self);
}
