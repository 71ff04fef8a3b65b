//! # Infrastructure Layer
//!
//! Implementations of the ports defined in `depot-application`, plus the
//! container that ties them together.
//!
//! ## Module Categories
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | `Container` and `ContainerBuilder`, query resolution, dumps |
//! | [`producers`] | Singleton, single-identity, properties, environment and wrapper producers |
//! | [`engines`] | Closure-backed engines |
//! | [`alternative`] | Conditionally active producers superseding others |
//! | [`customizers`] | Post-build component customization |
//!
//! ### Storage
//! | Module | Description |
//! |--------|-------------|
//! | [`boxes`] | Boundless and disposable component boxes |
//! | [`warehouse`] | Standard and filtered warehouses |
//!
//! ### Activation & Isolation
//! | Module | Description |
//! |--------|-------------|
//! | [`activation`] | Activation sources and per-container snapshots |
//! | [`local`] | Thread-local and named producer overlays |
//! | [`registry`] | Process-wide container registry |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/env configuration through figment |
//! | [`constants`] | Infrastructure constants |
//! | [`logging`] | Structured logging with tracing |

pub mod activation;
pub mod alternative;
pub mod boxes;
pub mod config;
pub mod constants;
pub mod container;
pub mod customizers;
pub mod engines;
pub mod error_ext;
pub mod local;
pub mod logging;
pub mod producers;
pub mod registry;
pub mod utils;
pub mod warehouse;

// Re-export commonly used types
pub use container::{Container, ContainerBuilder};
pub use error_ext::ErrorContext;
pub use utils::TimedOperation;
