//! Type Descriptors
//!
//! Explicit, reflection-free description of the declared type of a
//! component. A descriptor is a raw type plus an ordered list of type
//! arguments, built once at registration time and compared structurally.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::ANY_TYPE_NAME;

/// Value Object: Raw Type
///
/// A named type together with the names of the supertypes (interfaces,
/// trait objects, base types) it can be assigned to.
///
/// ## Business Rules
///
/// - Equality and hashing consider the name only
/// - Every raw type is assignable to itself and to the root type [`RawType::any`]
/// - Supertypes are not transitive: list every supertype a query may target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawType {
    name: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    supertypes: Vec<Cow<'static, str>>,
}

impl RawType {
    /// Create a raw type with the given name
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
        }
    }

    /// Raw type named after a Rust type
    pub fn of<T: ?Sized>() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    /// The root raw type: every type is assignable to it
    pub fn any() -> Self {
        Self::named(ANY_TYPE_NAME)
    }

    /// Declare a supertype this raw type is assignable to
    #[must_use]
    pub fn extends(mut self, supertype: impl Into<Cow<'static, str>>) -> Self {
        let supertype = supertype.into();
        if !self.supertypes.contains(&supertype) {
            self.supertypes.push(supertype);
        }
        self
    }

    /// Declare a Rust type (usually a `dyn Trait`) as supertype
    #[must_use]
    pub fn extends_type<T: ?Sized>(self) -> Self {
        self.extends(std::any::type_name::<T>())
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared supertypes
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.supertypes.iter().map(AsRef::as_ref)
    }

    /// Whether this is the root raw type
    pub fn is_any(&self) -> bool {
        self.name == ANY_TYPE_NAME
    }

    /// Whether a value of this raw type can be assigned to `target`
    pub fn is_assignable_to(&self, target: &RawType) -> bool {
        target.is_any()
            || self.name == target.name
            || self.supertypes.iter().any(|s| *s == target.name)
    }

    /// Last path segment of the name, for compact display
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

fn simple_name(name: &str) -> &str {
    let head = name.split('<').next().unwrap_or(name);
    match head.rfind("::") {
        Some(index) => &name[index + 2..],
        None => name,
    }
}

impl PartialEq for RawType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RawType {}

impl Hash for RawType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Value Object: Type Descriptor
///
/// A possibly parameterized type: raw type plus ordered type arguments.
///
/// ## Matching
///
/// - A descriptor without arguments used as a target matches any
///   parameterization of an assignable raw type (raw-type matching)
/// - A descriptor with arguments requires an assignable raw type and
///   argument-by-argument equality (no covariance)
///
/// ## Example
///
/// ```rust
/// use depot_domain::{RawType, TypeDescriptor};
///
/// let holder_of_i32 = TypeDescriptor::new(RawType::named("Holder"))
///     .with_arg(TypeDescriptor::of::<i32>());
/// let holder = TypeDescriptor::new(RawType::named("Holder"));
///
/// assert!(holder_of_i32.is_assignable_to(&holder));
/// assert!(!holder.is_assignable_to(&holder_of_i32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    raw: RawType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Non-generic descriptor over a raw type
    pub fn new(raw: RawType) -> Self {
        Self {
            raw,
            args: Vec::new(),
        }
    }

    /// Descriptor named after a Rust type
    pub fn of<T: ?Sized>() -> Self {
        Self::new(RawType::of::<T>())
    }

    /// Descriptor for a plain type name
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(RawType::named(name))
    }

    /// The root descriptor, matching every declared type
    pub fn any() -> Self {
        Self::new(RawType::any())
    }

    /// Append a type argument
    #[must_use]
    pub fn with_arg(mut self, arg: TypeDescriptor) -> Self {
        self.args.push(arg);
        self
    }

    /// Replace all type arguments
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Raw type
    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    /// Type arguments, empty for non-generic types
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    /// Whether the descriptor carries type arguments
    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    /// Same raw type, arguments dropped
    #[must_use]
    pub fn erased(&self) -> Self {
        Self::new(self.raw.clone())
    }

    /// Whether a component declared with `self` satisfies a query for `target`
    pub fn is_assignable_to(&self, target: &TypeDescriptor) -> bool {
        if !self.raw.is_assignable_to(&target.raw) {
            return false;
        }
        if target.args.is_empty() {
            return true;
        }
        self.args == target.args
    }
}

impl From<RawType> for TypeDescriptor {
    fn from(raw: RawType) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
