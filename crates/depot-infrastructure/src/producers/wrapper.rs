//! Producer decoration

use std::sync::Arc;

use depot_application::{Engine, Producer};
use depot_domain::{
    BillOfMaterials, BoxPolicy, Identity, NamedComponent, Query, Result, SatisfiedBom,
    TypeDescriptor,
};

type TransformFn = dyn Fn(NamedComponent, &SatisfiedBom) -> Result<NamedComponent> + Send + Sync;

/// Wraps a producer to change its priority, extend its bills of materials,
/// or transform what it builds
///
/// # Example
///
/// ```ignore
/// let audited = ProducerWrapper::new(Arc::new(mailer_producer))
///     .with_priority(10)
///     .with_dependency(Query::by_identity(Identity::of::<AuditLog>("audit")))
///     .transforming(|mailer, bom| wrap_with_audit(mailer, bom));
/// ```
#[derive(Clone)]
pub struct ProducerWrapper {
    name: String,
    inner: Arc<dyn Producer>,
    priority: Option<i32>,
    extra_dependencies: BillOfMaterials,
    transform: Option<Arc<TransformFn>>,
}

impl ProducerWrapper {
    /// Wrap `inner` without changing anything yet
    pub fn new(inner: Arc<dyn Producer>) -> Self {
        Self {
            name: format!("wrapped {}", inner.name()),
            inner,
            priority: None,
            extra_dependencies: BillOfMaterials::empty(),
            transform: None,
        }
    }

    /// Override the priority of the producer and of what it builds
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Add a query to every bill of materials
    #[must_use]
    pub fn with_dependency(mut self, query: Query) -> Self {
        self.extra_dependencies = self.extra_dependencies.with(query);
        self
    }

    /// Transform every built component
    #[must_use]
    pub fn transforming<F>(mut self, transform: F) -> Self
    where
        F: Fn(NamedComponent, &SatisfiedBom) -> Result<NamedComponent> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }
}

impl Producer for ProducerWrapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority.unwrap_or_else(|| self.inner.priority())
    }

    fn can_build(&self, identity: &Identity) -> bool {
        self.inner.can_build(identity)
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        let inner = self.inner.engine_for(identity)?;
        let bill_of_materials = inner
            .bill_of_materials()
            .clone()
            .merge(&self.extra_dependencies);
        Ok(Arc::new(WrappedEngine {
            inner,
            bill_of_materials,
            priority: self.priority,
            transform: self.transform.clone(),
        }))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        self.inner.buildable_identities(target)
    }
}

struct WrappedEngine {
    inner: Arc<dyn Engine>,
    bill_of_materials: BillOfMaterials,
    priority: Option<i32>,
    transform: Option<Arc<TransformFn>>,
}

impl Engine for WrappedEngine {
    fn identity(&self) -> &Identity {
        self.inner.identity()
    }

    fn priority(&self) -> i32 {
        self.priority.unwrap_or_else(|| self.inner.priority())
    }

    fn bill_of_materials(&self) -> &BillOfMaterials {
        &self.bill_of_materials
    }

    fn build(&self, satisfied: &SatisfiedBom) -> Result<NamedComponent> {
        let mut built = self.inner.build(satisfied)?;
        if let Some(priority) = self.priority {
            built = built.with_priority(priority);
        }
        match &self.transform {
            Some(transform) => transform(built, satisfied),
            None => Ok(built),
        }
    }

    fn box_policy(&self) -> BoxPolicy {
        self.inner.box_policy()
    }
}
