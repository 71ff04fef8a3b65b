//! Domain Layer - Depot
//!
//! Pure model of the component resolution engine. Nothing in this crate
//! builds or stores components; it only describes them.
//!
//! ## Concepts
//!
//! | Concept | Type |
//! |---------|------|
//! | Declared type of a component (possibly generic) | [`TypeDescriptor`] |
//! | `(type, name)` key of a component | [`Identity`] |
//! | Search criteria | [`Query`] |
//! | Built component with its priority | [`NamedComponent`] |
//! | Static dependency list of an engine | [`BillOfMaterials`] |
//! | Resolved dependencies handed to an engine | [`SatisfiedBom`] |
//! | Reuse policy of a built component | [`BoxPolicy`] |
//!
//! ## Dependencies
//!
//! This crate depends only on `serde` and `thiserror`.

pub mod constants;
pub mod error;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
