//! Built Components
//!
//! Type-erased component values, their identity and priority, and the
//! reuse policy of the box they are stored in.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use crate::error::{Error, Result};

/// Capability of a component holding resources that must be released explicitly
///
/// Containers call [`Closeable::close`] on teardown for every component
/// built with [`Component::closeable`].
pub trait Closeable: Send + Sync {
    /// Release the resources held by the component
    fn close(&self) -> Result<()>;
}

/// A type-erased component value
///
/// Cloning a component clones the handle, never the value.
#[derive(Clone)]
pub struct Component {
    value: Arc<dyn Any + Send + Sync>,
    closer: Option<Arc<dyn Closeable>>,
    type_name: &'static str,
}

impl Component {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap a shared value without copying it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            closer: None,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap a value released on container teardown
    pub fn closeable<T: Closeable + Any>(value: T) -> Self {
        let value = Arc::new(value);
        Self {
            closer: Some(Arc::clone(&value) as Arc<dyn Closeable>),
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type-erased value
    pub fn as_any(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.value
    }

    /// Shared handle on the value if it is a `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Borrow the value if it is a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Whether the value supports explicit release
    pub fn is_closeable(&self) -> bool {
        self.closer.is_some()
    }

    /// Release the value, no-op for values that are not closeable
    pub fn close(&self) -> Result<()> {
        match &self.closer {
            Some(closer) => closer.close(),
            None => Ok(()),
        }
    }

    /// Whether both handles point at the same value
    pub fn same_instance(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name)
            .field("closeable", &self.is_closeable())
            .finish_non_exhaustive()
    }
}

/// Value Object: Named Component
///
/// A built component value together with its identity and priority.
/// Immutable once built.
///
/// ## Example
///
/// ```rust
/// use depot_domain::{Identity, NamedComponent};
///
/// let greeting = NamedComponent::of(Identity::of::<String>("greeting"), "hello".to_string());
///
/// assert_eq!(greeting.priority(), 0);
/// assert_eq!(greeting.value::<String>().as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct NamedComponent {
    identity: Identity,
    priority: i32,
    component: Component,
}

impl NamedComponent {
    /// Create a named component
    pub fn new(identity: Identity, priority: i32, component: Component) -> Self {
        Self {
            identity,
            priority,
            component,
        }
    }

    /// Named component with default priority wrapping `value`
    pub fn of<T: Any + Send + Sync>(identity: Identity, value: T) -> Self {
        Self::new(
            identity,
            crate::constants::DEFAULT_PRIORITY,
            Component::new(value),
        )
    }

    /// Identity of the component
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Component name
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Priority of the component
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Type-erased value
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Shared handle on the value if it is a `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.component.downcast::<T>()
    }

    /// Shared handle on the value, failing with a type mismatch
    pub fn try_downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.downcast::<T>()
            .ok_or_else(|| Error::type_mismatch::<T>(&self.identity))
    }

    /// Copy of the value if it is a `T`
    pub fn value<T: Any + Clone>(&self) -> Option<T> {
        self.component.downcast_ref::<T>().cloned()
    }

    /// Whether both components share the same value instance
    pub fn same_instance(&self, other: &NamedComponent) -> bool {
        self.component.same_instance(&other.component)
    }

    /// Same value under another priority
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Same identity and priority, another value
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.component = component;
        self
    }
}

impl PartialEq for NamedComponent {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.priority == other.priority
            && self.same_instance(other)
    }
}

/// Reuse policy of a stored component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxPolicy {
    /// Shared: every checkout returns the same instance
    #[default]
    Boundless,
    /// Single use: discarded on checkout, rebuilt on the next request
    Disposable,
}

impl fmt::Display for BoxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boundless => f.write_str("boundless"),
            Self::Disposable => f.write_str("disposable"),
        }
    }
}
