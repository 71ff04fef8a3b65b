//! Component boxes
//!
//! Boxes wrap a built component with its reuse policy. The warehouse stores
//! boxes, never bare components.

use std::sync::{Arc, Mutex, PoisonError};

use depot_application::ComponentBox;
use depot_domain::{BoxPolicy, Identity, NamedComponent, Result};

/// Box handing out the same instance on every pick
#[derive(Debug)]
pub struct BoundlessComponentBox {
    component: NamedComponent,
}

impl BoundlessComponentBox {
    /// Box a component for shared reuse
    pub fn new(component: NamedComponent) -> Self {
        Self { component }
    }
}

impl ComponentBox for BoundlessComponentBox {
    fn identity(&self) -> &Identity {
        self.component.identity()
    }

    fn policy(&self) -> BoxPolicy {
        BoxPolicy::Boundless
    }

    fn pick(&self) -> Option<NamedComponent> {
        Some(self.component.clone())
    }

    fn close(&self) -> Result<()> {
        self.component.component().close()
    }
}

/// Box handing out its component once
///
/// A picked component is owned by whoever picked it: closing the box after
/// a pick does not close the component.
#[derive(Debug)]
pub struct DisposableComponentBox {
    identity: Identity,
    component: Mutex<Option<NamedComponent>>,
}

impl DisposableComponentBox {
    /// Box a component for single use
    pub fn new(component: NamedComponent) -> Self {
        Self {
            identity: component.identity().clone(),
            component: Mutex::new(Some(component)),
        }
    }
}

impl ComponentBox for DisposableComponentBox {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn policy(&self) -> BoxPolicy {
        BoxPolicy::Disposable
    }

    fn pick(&self) -> Option<NamedComponent> {
        self.component
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn close(&self) -> Result<()> {
        let remaining = self
            .component
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match remaining {
            Some(component) => component.component().close(),
            None => Ok(()),
        }
    }
}

/// Box a component according to a policy
pub fn box_component(component: NamedComponent, policy: BoxPolicy) -> Arc<dyn ComponentBox> {
    match policy {
        BoxPolicy::Boundless => Arc::new(BoundlessComponentBox::new(component)),
        BoxPolicy::Disposable => Arc::new(DisposableComponentBox::new(component)),
    }
}
