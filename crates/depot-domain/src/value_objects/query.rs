//! Component Queries
//!
//! A query tells a container what to look for: one exact identity, every
//! component assignable to a raw type, or every component of a fully
//! parameterized type. Each query is either mandatory or optional.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::types::TypeDescriptor;

/// What a query targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum QueryKind {
    /// Exactly one identity
    ByIdentity(Identity),
    /// Any identity whose declared raw type is assignable to the target
    ByRawType(TypeDescriptor),
    /// Assignable raw type and equal type arguments
    ByParameterizedType(TypeDescriptor),
}

/// Value Object: Query
///
/// ## Business Rules
///
/// - A mandatory query resolving to zero components is a resolution failure
/// - An optional query resolving to zero components yields an absent value
/// - Identity queries are mandatory by default, type queries optional
///
/// ## Example
///
/// ```rust
/// use depot_domain::{Identity, Query, TypeDescriptor};
///
/// let one = Query::by_identity(Identity::of::<String>("greeting")).optional();
/// let all = Query::by_type(TypeDescriptor::named("Plugin"));
///
/// assert!(!one.is_mandatory());
/// assert!(all.is_multiple());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    kind: QueryKind,
    mandatory: bool,
}

impl Query {
    /// Mandatory query for one exact identity
    pub fn by_identity(identity: Identity) -> Self {
        Self {
            kind: QueryKind::ByIdentity(identity),
            mandatory: true,
        }
    }

    /// Optional query for every component assignable to a type
    ///
    /// A descriptor with type arguments gives a parameterized query,
    /// otherwise a raw-type query.
    pub fn by_type(target: TypeDescriptor) -> Self {
        let kind = if target.is_parameterized() {
            QueryKind::ByParameterizedType(target)
        } else {
            QueryKind::ByRawType(target)
        };
        Self {
            kind,
            mandatory: false,
        }
    }

    /// Optional raw-type query, ignoring any type arguments of `target`
    pub fn by_raw_type(target: TypeDescriptor) -> Self {
        Self {
            kind: QueryKind::ByRawType(target.erased()),
            mandatory: false,
        }
    }

    /// Optional query for every component of the Rust type `T`
    pub fn of<T: ?Sized>() -> Self {
        Self::by_type(TypeDescriptor::of::<T>())
    }

    /// Mark the query mandatory
    #[must_use]
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Mark the query optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Query target
    pub fn kind(&self) -> &QueryKind {
        &self.kind
    }

    /// Whether finding nothing is a failure
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Whether the query may yield several components
    pub fn is_multiple(&self) -> bool {
        !matches!(self.kind, QueryKind::ByIdentity(_))
    }

    /// Identity targeted by an identity query
    pub fn identity(&self) -> Option<&Identity> {
        match &self.kind {
            QueryKind::ByIdentity(identity) => Some(identity),
            _ => None,
        }
    }

    /// Type the query searches for
    pub fn target_type(&self) -> &TypeDescriptor {
        match &self.kind {
            QueryKind::ByIdentity(identity) => identity.declared_type(),
            QueryKind::ByRawType(target) | QueryKind::ByParameterizedType(target) => target,
        }
    }

    /// Whether a component with `identity` satisfies this query
    pub fn matches(&self, identity: &Identity) -> bool {
        match &self.kind {
            QueryKind::ByIdentity(target) => target == identity,
            QueryKind::ByRawType(target) => identity
                .declared_type()
                .raw()
                .is_assignable_to(target.raw()),
            QueryKind::ByParameterizedType(target) => {
                identity.declared_type().is_assignable_to(target)
            }
        }
    }
}

impl From<Identity> for Query {
    fn from(identity: Identity) -> Self {
        Self::by_identity(identity)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QueryKind::ByIdentity(identity) => write!(f, "{identity}")?,
            QueryKind::ByRawType(target) => write!(f, "raw type {}", target.raw())?,
            QueryKind::ByParameterizedType(target) => write!(f, "type {target}")?,
        }
        if !self.mandatory {
            f.write_str(" (optional)")?;
        }
        Ok(())
    }
}
