//! Component container
//!
//! A [`Container`] resolves queries into components by choosing, for every
//! identity, the producer with the highest precedence, satisfying its bill
//! of materials recursively, and storing the result in its own warehouse.
//!
//! ## Precedence
//!
//! Registered producers are ordered by:
//!
//! 1. priority, descending
//! 2. layer: local overrides, then alternatives, then regular producers
//! 3. registration order
//!
//! The first producer in this order able to build an identity wins. Two
//! regular producers with equal priority claiming the same identity make the
//! identity ambiguous.
//!
//! ## Example
//!
//! ```ignore
//! let container = Container::builder()
//!     .add_producer(SingletonProducer::of(Identity::of::<String>("greeting"), "hello".to_string()))
//!     .build()?;
//!
//! let greeting = container.get_component::<String>(&Identity::of::<String>("greeting"))?;
//! container.close();
//! ```

mod builder;
mod dump;
mod resolution;

pub use builder::ContainerBuilder;
pub use dump::{DependencyEdge, DependencyGraph, DependencyNode};

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use depot_application::{CustomizerEngine, Producer, Warehouse};
use depot_domain::{Error, Identity, NamedComponent, Query, Result, TypeDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::activation::{ActivationSnapshot, EnvActivationSource};
use crate::local::LocalProducers;
use crate::registry::ContainerHandle;
use crate::warehouse::{FilteredWarehouse, StdWarehouse};

/// Registration layer of a producer
///
/// Ordered from lowest to highest precedence among producers of equal
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerLayer {
    /// Registered directly or discovered
    Regular,
    /// Active alternative
    Alternative,
    /// Local overlay override
    Local,
}

impl fmt::Display for ProducerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => f.write_str("regular"),
            Self::Alternative => f.write_str("alternative"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// A producer as registered in a container
#[derive(Clone)]
pub(crate) struct RegisteredProducer {
    pub(crate) producer: Arc<dyn Producer>,
    pub(crate) layer: ProducerLayer,
    pub(crate) order: usize,
    pub(crate) source: String,
}

impl RegisteredProducer {
    fn name(&self) -> &str {
        self.producer.name()
    }

    fn priority(&self) -> i32 {
        self.producer.priority()
    }

    /// Whether `self` and `other`, in precedence order, leave an identity ambiguous
    fn ties_with(&self, other: &RegisteredProducer) -> bool {
        self.layer == ProducerLayer::Regular
            && other.layer == ProducerLayer::Regular
            && self.priority() == other.priority()
    }
}

/// Sort producers by precedence
pub(crate) fn sort_by_precedence(producers: &mut [RegisteredProducer]) {
    producers.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| b.layer.cmp(&a.layer))
            .then_with(|| a.order.cmp(&b.order))
    });
}

/// Resolves queries into components and owns the components it built
pub struct Container {
    handle: ContainerHandle,
    id: String,
    producers: Vec<RegisteredProducer>,
    customizers: Vec<Arc<dyn CustomizerEngine>>,
    warehouse: Arc<StdWarehouse>,
    activation: ActivationSnapshot,
    build_locks: DashMap<Identity, Arc<Mutex<()>>>,
    blueprint: ContainerBuilder,
}

impl Container {
    /// Start configuring a container
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Container over the discovered producers, the thread-local overlay
    /// and activation values read from the environment
    pub fn new_instance() -> Result<Self> {
        Self::builder()
            .with_discovery(true)
            .add_local_producers(&LocalProducers::thread_local())
            .with_activation_source(Arc::new(EnvActivationSource))
            .build()
    }

    /// Opaque handle, as used by the container registry
    pub fn handle(&self) -> ContainerHandle {
        self.handle
    }

    /// Container id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Own warehouse, chaining the warehouse providers
    pub fn warehouse(&self) -> Arc<dyn Warehouse> {
        Arc::clone(&self.warehouse) as Arc<dyn Warehouse>
    }

    /// Read-only view over the own warehouse, to hand to another container
    /// as a warehouse provider
    pub fn filtered_warehouse(&self) -> FilteredWarehouse {
        FilteredWarehouse::new(self.warehouse())
    }

    /// Activation values of this container
    pub fn activation(&self) -> &ActivationSnapshot {
        &self.activation
    }

    /// Names of the registered producers, in precedence order
    pub fn producer_names(&self) -> Vec<String> {
        self.producers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Every component satisfying `query`, in (priority desc, name asc) order
    ///
    /// Components are built on demand. A mandatory query finding nothing
    /// fails; an identity query yields at most one component.
    pub fn find(&self, query: &Query) -> Result<Vec<NamedComponent>> {
        let mut chain = Vec::new();
        self.resolve_query(query, None, &mut chain)
    }

    /// First component satisfying `query`
    ///
    /// Identity queries are mandatory by default: use [`Query::optional`] to
    /// get `Ok(None)` for an absent identity instead of an error.
    pub fn find_one(&self, query: &Query) -> Result<Option<NamedComponent>> {
        Ok(self.find(query)?.into_iter().next())
    }

    /// First component satisfying `query`, which must exist
    pub fn must_get(&self, query: &Query) -> Result<NamedComponent> {
        let mandatory = query.clone().mandatory();
        self.find_one(&mandatory)?
            .ok_or_else(|| Error::missing_dependency(&mandatory, None))
    }

    /// Value of the component `identity`, downcast to `T`
    pub fn get_component<T: Any + Send + Sync>(&self, identity: &Identity) -> Result<Arc<T>> {
        self.must_get(&Query::by_identity(identity.clone()))?
            .try_downcast::<T>()
    }

    /// Values of every component assignable to `target`, downcast to `T`
    pub fn get_components<T: Any + Send + Sync>(
        &self,
        target: &TypeDescriptor,
    ) -> Result<Vec<Arc<T>>> {
        self.find(&Query::by_type(target.clone()))?
            .iter()
            .map(NamedComponent::try_downcast::<T>)
            .collect()
    }

    /// Identities `query` would resolve to, without building anything
    pub fn find_identities(&self, query: &Query) -> Vec<Identity> {
        self.candidate_identities(query)
    }

    /// Statically verify that `query` can be satisfied
    ///
    /// Walks the bills of materials without building: reports cycles,
    /// ambiguities and missing mandatory dependencies.
    pub fn check_satisfy(&self, query: &Query) -> Result<()> {
        let mut path = Vec::new();
        let mut verified = HashSet::new();
        self.precheck_query(query, None, &mut path, &mut verified)
    }

    /// New container with one more producer
    ///
    /// Same registrations, activation sources and warehouse providers; the
    /// new container starts with an empty own warehouse.
    pub fn concat(&self, producer: impl Producer + 'static) -> Result<Container> {
        self.blueprint.clone().add_producer(producer).build()
    }

    /// Builder preconfigured with the registrations of this container
    pub fn child_builder(&self) -> ContainerBuilder {
        self.blueprint.clone()
    }

    /// Close every component built by this container, latest first
    ///
    /// Components inherited from warehouse providers are left untouched.
    /// Close failures are logged and do not stop the teardown.
    pub fn close(&self) {
        info!(container = %self.id, components = self.warehouse.len(), "Closing container");
        self.warehouse.close();
        self.build_locks.clear();
        debug!(container = %self.id, "Container closed");
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("producers", &self.producers.len())
            .field("customizers", &self.customizers.len())
            .field("warehouse", &self.warehouse)
            .finish_non_exhaustive()
    }
}
