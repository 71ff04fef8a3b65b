//! Producers shipped with the engine
//!
//! | Producer | Builds | Priority |
//! |----------|--------|----------|
//! | [`SingletonProducer`] | one prebuilt component | the component's |
//! | [`SingleIdentityProducer`] | one identity through one engine | the engine's |
//! | [`PropertiesProducer`] | `String` components from a key/value map | `-1000` |
//! | [`EnvironmentProducer`] | `String` components from environment variables | `-1000` |
//! | [`WarehouseProvidersProducer`] | nothing, lists provider warehouse contents | `-10000` |
//! | [`ProducerWrapper`] | whatever the wrapped producer builds | overridable |

mod properties;
mod single;
mod warehouse_providers;
mod wrapper;

pub use properties::{EnvironmentProducer, PropertiesProducer};
pub use single::{SingleIdentityProducer, SingletonProducer};
pub use warehouse_providers::WarehouseProvidersProducer;
pub use wrapper::ProducerWrapper;

use depot_domain::{Identity, TypeDescriptor};

/// `[identity]` if its raw type is assignable to `target`'s, else empty
pub(crate) fn listed_if_assignable(identity: &Identity, target: &TypeDescriptor) -> Vec<Identity> {
    if identity
        .declared_type()
        .raw()
        .is_assignable_to(target.raw())
    {
        vec![identity.clone()]
    } else {
        Vec::new()
    }
}
