//! Component Identity

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::TypeDescriptor;
use crate::constants::{ACTIVATION_KEY_SEPARATOR, ACTIVATION_NAMESPACE};

/// Value Object: Component Identity
///
/// The `(declared type, name)` key of a component. Two identities are equal
/// iff both the declared type (including type arguments) and the name match.
///
/// ## Example
///
/// ```rust
/// use depot_domain::{Identity, TypeDescriptor};
///
/// let mailer = Identity::new(TypeDescriptor::named("Mailer"), "smtp");
/// assert_eq!(mailer.to_string(), "Mailer[smtp]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    declared_type: TypeDescriptor,
    name: Cow<'static, str>,
}

impl Identity {
    /// Create an identity
    pub fn new(declared_type: TypeDescriptor, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            declared_type,
            name: name.into(),
        }
    }

    /// Identity whose declared type is the Rust type `T`
    pub fn of<T: ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TypeDescriptor::of::<T>(), name)
    }

    /// Declared type
    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key under which the activation of this identity is looked up
    ///
    /// Format: `depot.activation::<raw type>::<name>`
    pub fn activation_key(&self) -> String {
        activation_key(self.declared_type.raw().name(), &self.name)
    }
}

/// Activation key for a raw type name and component name
pub fn activation_key(raw_type: &str, name: &str) -> String {
    format!(
        "{ACTIVATION_NAMESPACE}{ACTIVATION_KEY_SEPARATOR}{raw_type}{ACTIVATION_KEY_SEPARATOR}{name}"
    )
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.declared_type, self.name)
    }
}
