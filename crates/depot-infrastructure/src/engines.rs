//! Engines
//!
//! [`StdEngine`] turns a closure into an [`Engine`]. Most producers hand out
//! `StdEngine`s.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use depot_application::Engine;
use depot_domain::constants::DEFAULT_PRIORITY;
use depot_domain::{
    BillOfMaterials, BoxPolicy, Component, Identity, NamedComponent, Result, SatisfiedBom,
};

type BuildFn = dyn Fn(&SatisfiedBom) -> Result<Component> + Send + Sync;

/// Closure-backed engine
///
/// # Example
///
/// ```ignore
/// let greeter = StdEngine::of(
///     Identity::of::<Greeter>("greeter"),
///     BillOfMaterials::of([Query::by_identity(Identity::of::<String>("greeting"))]),
///     |bom| Ok(Greeter::new(bom.require::<String>(&greeting_query)?)),
/// );
/// ```
#[derive(Clone)]
pub struct StdEngine {
    identity: Identity,
    priority: i32,
    bill_of_materials: BillOfMaterials,
    policy: BoxPolicy,
    build: Arc<BuildFn>,
}

impl StdEngine {
    /// Engine building type-erased components
    pub fn new<F>(identity: Identity, bill_of_materials: BillOfMaterials, build: F) -> Self
    where
        F: Fn(&SatisfiedBom) -> Result<Component> + Send + Sync + 'static,
    {
        Self {
            identity,
            priority: DEFAULT_PRIORITY,
            bill_of_materials,
            policy: BoxPolicy::Boundless,
            build: Arc::new(build),
        }
    }

    /// Engine building values of type `T`
    pub fn of<T, F>(identity: Identity, bill_of_materials: BillOfMaterials, build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&SatisfiedBom) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(identity, bill_of_materials, move |bom| {
            build(bom).map(Component::new)
        })
    }

    /// Engine without dependencies
    pub fn no_deps<T, F>(identity: Identity, build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self::of(identity, BillOfMaterials::empty(), move |_| build())
    }

    /// Engine producing a copy of `value` on each build
    pub fn value<T>(identity: Identity, value: T) -> Self
    where
        T: Any + Send + Sync + Clone,
    {
        Self::no_deps(identity, move || Ok(value.clone()))
    }

    /// Set the priority of built components
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the box policy
    #[must_use]
    pub fn with_policy(mut self, policy: BoxPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a new component on every request
    #[must_use]
    pub fn disposable(self) -> Self {
        self.with_policy(BoxPolicy::Disposable)
    }
}

impl Engine for StdEngine {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn bill_of_materials(&self) -> &BillOfMaterials {
        &self.bill_of_materials
    }

    fn build(&self, satisfied: &SatisfiedBom) -> Result<NamedComponent> {
        let component = (self.build)(satisfied)?;
        Ok(NamedComponent::new(
            self.identity.clone(),
            self.priority,
            component,
        ))
    }

    fn box_policy(&self) -> BoxPolicy {
        self.policy
    }
}

impl fmt::Debug for StdEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdEngine")
            .field("identity", &self.identity)
            .field("priority", &self.priority)
            .field("policy", &self.policy)
            .field("bill_of_materials", &self.bill_of_materials.len())
            .finish_non_exhaustive()
    }
}

/// Engine building the component of another engine under a different identity
///
/// Used by alternatives whose producer builds a subtype under its own name.
pub struct RetargetedEngine {
    identity: Identity,
    inner: Arc<dyn Engine>,
}

impl RetargetedEngine {
    /// Build `inner`'s component under `identity`
    pub fn new(identity: Identity, inner: Arc<dyn Engine>) -> Self {
        Self { identity, inner }
    }
}

impl Engine for RetargetedEngine {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn priority(&self) -> i32 {
        self.inner.priority()
    }

    fn bill_of_materials(&self) -> &BillOfMaterials {
        self.inner.bill_of_materials()
    }

    fn build(&self, satisfied: &SatisfiedBom) -> Result<NamedComponent> {
        let built = self.inner.build(satisfied)?;
        Ok(NamedComponent::new(
            self.identity.clone(),
            built.priority(),
            built.component().clone(),
        ))
    }

    fn box_policy(&self) -> BoxPolicy {
        self.inner.box_policy()
    }
}
