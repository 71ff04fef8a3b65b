//! Domain Value Objects
//!
//! Immutable values describing components and the searches made for them.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`RawType`] | Named type plus the supertypes it is assignable to |
//! | [`TypeDescriptor`] | Raw type plus ordered type arguments |
//! | [`Identity`] | `(declared type, name)` component key |
//! | [`Query`] | Identity, raw-type or parameterized-type search |
//! | [`NamedComponent`] | Built value with identity and priority |
//! | [`BillOfMaterials`] | Queries an engine depends on |
//! | [`SatisfiedBom`] | Components resolved for a bill of materials |

/// Bills of materials
pub mod bom;
/// Built component values
pub mod component;
/// Component identities
pub mod identity;
/// Component queries
pub mod query;
/// Type descriptors
pub mod types;

pub use bom::{BillOfMaterials, SatisfiedBom};
pub use component::{BoxPolicy, Closeable, Component, NamedComponent};
pub use identity::{Identity, activation_key};
pub use query::{Query, QueryKind};
pub use types::{RawType, TypeDescriptor};
