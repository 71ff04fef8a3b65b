//! Port definitions
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`Producer`] | engine producers, alternatives, overlays |
//! | [`Engine`] | closure engines, wrapped engines |
//! | [`ComponentBox`] | boundless and disposable boxes |
//! | [`Warehouse`] | standard and filtered warehouses |
//! | [`ActivationSource`] | map, environment and layered sources |
//! | [`CustomizerEngine`] | customizer engines |

pub mod activation;
pub mod component_box;
pub mod customizer;
pub mod engine;
pub mod producer;
pub mod registry;
pub mod warehouse;

pub use activation::ActivationSource;
pub use component_box::ComponentBox;
pub use customizer::{ComponentCustomizer, CustomizerEngine};
pub use engine::Engine;
pub use producer::Producer;
pub use registry::{
    PRODUCERS, ProducerEntry, discovered_producers, list_discovered_producers, resolve_producer,
};
pub use warehouse::{StoredBox, Warehouse};
