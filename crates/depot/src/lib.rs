//! # Depot
//!
//! Component resolution and dependency injection engine.
//!
//! Components are registered as *producers*: units that know which
//! identities they can build, what each build depends on, and how to
//! build it. A [`Container`] answers queries by picking the producer with
//! the highest precedence for every identity, resolving its dependencies
//! recursively and caching the result in its warehouse.
//!
//! ## Features
//!
//! - **Priorities and alternatives**: override any component by registering
//!   a higher-priority producer, or an alternative active under a flag
//! - **Boundless and disposable components**: shared instances or one
//!   instance per request
//! - **Warehouse composition**: child containers reuse what a parent
//!   already built, by reference
//! - **Static verification**: cycles, ambiguities and missing mandatory
//!   dependencies are reported before anything is built
//! - **Test isolation**: thread-local and named overlays supersede
//!   registrations without touching them
//!
//! ## Example
//!
//! ```rust
//! use depot::prelude::*;
//!
//! # fn main() -> depot::Result<()> {
//! let greeting = Identity::of::<String>("greeting");
//! let banner = Identity::of::<String>("banner");
//! let greeting_query = Query::by_identity(greeting.clone());
//!
//! let container = Container::builder()
//!     .add_producer(SingletonProducer::of(greeting, "hello".to_string()))
//!     .add_producer(SingleIdentityProducer::new(StdEngine::of(
//!         banner.clone(),
//!         BillOfMaterials::of([greeting_query.clone()]),
//!         move |bom| Ok(format!("*** {} ***", bom.require::<String>(&greeting_query)?)),
//!     )))
//!     .build()?;
//!
//! assert_eq!(container.get_component::<String>(&banner)?.as_str(), "*** hello ***");
//! container.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identities, queries, components, errors
//! - `application` - producer, engine, warehouse and activation ports, discovery registry
//! - `infrastructure` - container, warehouses, producers, configuration, logging

/// Domain layer - identities, queries, components and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use depot_domain::*;
}

/// Application layer - ports and the producer discovery registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use depot_application::*;
}

/// Infrastructure layer - container and implementations
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use depot_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the container at the crate root
pub use infrastructure::{Container, ContainerBuilder};

/// Everything needed to register producers and resolve components
pub mod prelude {
    pub use depot_application::{
        ActivationSource, ComponentCustomizer, CustomizerEngine, Engine, PRODUCERS, Producer,
        ProducerEntry, Warehouse,
    };
    pub use depot_domain::{
        BillOfMaterials, BoxPolicy, Closeable, Component, Error, Identity, NamedComponent, Query,
        QueryKind, RawType, Result, SatisfiedBom, TypeDescriptor,
    };
    pub use depot_infrastructure::activation::{EnvActivationSource, MapActivationSource};
    pub use depot_infrastructure::alternative::{Alternative, Condition};
    pub use depot_infrastructure::config::{ConfigLoader, DepotConfig};
    pub use depot_infrastructure::customizers::StdCustomizerEngine;
    pub use depot_infrastructure::engines::StdEngine;
    pub use depot_infrastructure::local::LocalProducers;
    pub use depot_infrastructure::producers::{
        EnvironmentProducer, ProducerWrapper, PropertiesProducer, SingleIdentityProducer,
        SingletonProducer,
    };
    pub use depot_infrastructure::registry::{ContainerHandle, ContainerRegistry};
    pub use depot_infrastructure::{Container, ContainerBuilder, ErrorContext};
}
