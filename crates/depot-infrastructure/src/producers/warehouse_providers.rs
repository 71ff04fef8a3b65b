//! Producer exposing the contents of provider warehouses

use std::sync::Arc;

use depot_application::{Engine, Producer, Warehouse};
use depot_domain::constants::WAREHOUSE_PROVIDERS_PRIORITY;
use depot_domain::{
    BillOfMaterials, BoxPolicy, Error, Identity, NamedComponent, Result, SatisfiedBom,
    TypeDescriptor,
};

/// Makes components held by provider warehouses visible to type queries
///
/// Identity lookups already reach provider warehouses through the chained
/// warehouse of the container; this producer only lists their identities
/// so raw-type and parameterized queries find them too. Its engines check
/// the component out of the provider and never build anything.
pub struct WarehouseProvidersProducer {
    name: String,
    providers: Vec<Arc<dyn Warehouse>>,
}

impl WarehouseProvidersProducer {
    /// Producer listing the contents of `providers`
    pub fn new(providers: Vec<Arc<dyn Warehouse>>) -> Self {
        let ids: Vec<&str> = providers.iter().map(|p| p.id()).collect();
        Self {
            name: format!("warehouse providers [{}]", ids.join(", ")),
            providers,
        }
    }
}

impl Producer for WarehouseProvidersProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        WAREHOUSE_PROVIDERS_PRIORITY
    }

    fn can_build(&self, identity: &Identity) -> bool {
        self.providers
            .iter()
            .any(|provider| provider.stored_box(identity).is_some())
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        if !self.can_build(identity) {
            return Err(Error::invalid_argument(format!(
                "no provider warehouse holds {identity}"
            )));
        }
        Ok(Arc::new(ProviderCheckoutEngine {
            identity: identity.clone(),
            providers: self.providers.clone(),
            bill_of_materials: BillOfMaterials::empty(),
        }))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        let mut identities: Vec<Identity> = Vec::new();
        for identity in self.providers.iter().flat_map(|p| p.list_names()) {
            if identity.declared_type().raw().is_assignable_to(target.raw())
                && !identities.contains(&identity)
            {
                identities.push(identity);
            }
        }
        identities
    }
}

/// Engine checking a component out of provider warehouses
///
/// Disposable so the consuming container never stores, and therefore never
/// closes, a component owned by another warehouse.
struct ProviderCheckoutEngine {
    identity: Identity,
    providers: Vec<Arc<dyn Warehouse>>,
    bill_of_materials: BillOfMaterials,
}

impl Engine for ProviderCheckoutEngine {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn priority(&self) -> i32 {
        WAREHOUSE_PROVIDERS_PRIORITY
    }

    fn bill_of_materials(&self) -> &BillOfMaterials {
        &self.bill_of_materials
    }

    fn build(&self, _satisfied: &SatisfiedBom) -> Result<NamedComponent> {
        self.providers
            .iter()
            .find_map(|provider| provider.check_out(&self.identity))
            .ok_or_else(|| {
                Error::build_failure(&self.identity, "no longer held by any provider warehouse")
            })
    }

    fn box_policy(&self) -> BoxPolicy {
        BoxPolicy::Disposable
    }
}
