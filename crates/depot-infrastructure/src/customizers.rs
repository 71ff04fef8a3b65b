//! Closure-backed component customizers

use std::sync::Arc;

use depot_application::{ComponentCustomizer, CustomizerEngine};
use depot_domain::{Identity, NamedComponent, Query, Result};

type CustomizeFn = dyn Fn(NamedComponent) -> Result<NamedComponent> + Send + Sync;

/// Customizer engine applying one closure to every component matching a query
///
/// # Example
///
/// ```ignore
/// let shout = StdCustomizerEngine::new("shout", Query::of::<String>(), |component| {
///     let upper = component.value::<String>().unwrap_or_default().to_uppercase();
///     Ok(component.with_component(Component::new(upper)))
/// });
/// ContainerBuilder::new().add_customizer(Arc::new(shout));
/// ```
pub struct StdCustomizerEngine {
    name: String,
    query: Query,
    priority: i32,
    customize: Arc<CustomizeFn>,
}

impl StdCustomizerEngine {
    /// Customize components matching `query` with `customize`
    pub fn new<F>(name: impl Into<String>, query: Query, customize: F) -> Self
    where
        F: Fn(NamedComponent) -> Result<NamedComponent> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            query,
            priority: 0,
            customize: Arc::new(customize),
        }
    }

    /// Set the order of the customizer, lower runs first
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl CustomizerEngine for StdCustomizerEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_customize(&self, identity: &Identity) -> bool {
        self.query.matches(identity)
    }

    fn customizer_for(&self, _identity: &Identity) -> Arc<dyn ComponentCustomizer> {
        Arc::new(StdCustomizer {
            priority: self.priority,
            customize: Arc::clone(&self.customize),
        })
    }
}

struct StdCustomizer {
    priority: i32,
    customize: Arc<CustomizeFn>,
}

impl ComponentCustomizer for StdCustomizer {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn customize(&self, component: NamedComponent) -> Result<NamedComponent> {
        (self.customize)(component)
    }
}
