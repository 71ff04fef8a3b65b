//! Single-identity producers

use std::sync::Arc;

use depot_application::{Engine, Producer};
use depot_domain::{Error, Identity, NamedComponent, Result, TypeDescriptor};

use super::listed_if_assignable;
use crate::engines::StdEngine;

/// Producer serving one prebuilt component
#[derive(Debug, Clone)]
pub struct SingletonProducer {
    name: String,
    component: NamedComponent,
}

impl SingletonProducer {
    /// Serve `component`
    pub fn new(component: NamedComponent) -> Self {
        Self {
            name: format!("singleton {}", component.identity()),
            component,
        }
    }

    /// Serve `value` under `identity` with default priority
    pub fn of<T: std::any::Any + Send + Sync>(identity: Identity, value: T) -> Self {
        Self::new(NamedComponent::of(identity, value))
    }

    fn ensure(&self, identity: &Identity) -> Result<()> {
        if identity == self.component.identity() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "{} cannot build {identity}",
                self.name
            )))
        }
    }
}

impl Producer for SingletonProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.component.priority()
    }

    fn can_build(&self, identity: &Identity) -> bool {
        identity == self.component.identity()
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        self.ensure(identity)?;
        let component = self.component.clone();
        let engine = StdEngine::new(
            component.identity().clone(),
            depot_domain::BillOfMaterials::empty(),
            move |_| Ok(component.component().clone()),
        )
        .with_priority(self.component.priority());
        Ok(Arc::new(engine))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        listed_if_assignable(self.component.identity(), target)
    }
}

/// Producer building one identity through one engine
#[derive(Clone)]
pub struct SingleIdentityProducer {
    name: String,
    engine: Arc<dyn Engine>,
}

impl SingleIdentityProducer {
    /// Producer for the identity of `engine`
    pub fn new(engine: impl Engine + 'static) -> Self {
        Self::from_arc(Arc::new(engine))
    }

    /// Producer for the identity of a shared engine
    pub fn from_arc(engine: Arc<dyn Engine>) -> Self {
        Self {
            name: format!("producer {}", engine.identity()),
            engine,
        }
    }

    /// Rename the producer, for dumps and error messages
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Producer for SingleIdentityProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.engine.priority()
    }

    fn can_build(&self, identity: &Identity) -> bool {
        identity == self.engine.identity()
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        if self.can_build(identity) {
            Ok(Arc::clone(&self.engine))
        } else {
            Err(Error::invalid_argument(format!(
                "{} cannot build {identity}",
                self.name
            )))
        }
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        listed_if_assignable(self.engine.identity(), target)
    }
}

impl std::fmt::Debug for SingleIdentityProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleIdentityProducer")
            .field("name", &self.name)
            .field("identity", self.engine.identity())
            .finish()
    }
}
