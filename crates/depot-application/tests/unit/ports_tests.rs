//! Tests for default port behavior

use std::sync::Arc;

use depot_application::{Engine, Producer};
use depot_domain::{
    BillOfMaterials, BoxPolicy, Identity, NamedComponent, Result, SatisfiedBom, TypeDescriptor,
};

struct Constant {
    identity: Identity,
    bom: BillOfMaterials,
}

impl Engine for Constant {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn priority(&self) -> i32 {
        0
    }

    fn bill_of_materials(&self) -> &BillOfMaterials {
        &self.bom
    }

    fn build(&self, _satisfied: &SatisfiedBom) -> Result<NamedComponent> {
        Ok(NamedComponent::of(self.identity.clone(), 1_u8))
    }
}

struct Two;

impl Producer for Two {
    fn name(&self) -> &str {
        "two"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn can_build(&self, identity: &Identity) -> bool {
        identity.declared_type().raw().name() == "u8"
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        Ok(Arc::new(Constant {
            identity: identity.clone(),
            bom: BillOfMaterials::empty(),
        }))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        [Identity::of::<u8>("a"), Identity::of::<u8>("b")]
            .into_iter()
            .filter(|i| i.declared_type().raw().is_assignable_to(target.raw()))
            .collect()
    }
}

#[test]
fn test_engine_defaults_to_boundless() {
    let engine = Two
        .engine_for(&Identity::of::<u8>("a"))
        .expect("engine should be available");

    assert_eq!(engine.box_policy(), BoxPolicy::Boundless);
    let built = engine.build(&SatisfiedBom::empty()).expect("build should succeed");
    assert_eq!(built.value::<u8>(), Some(1));
}

#[test]
fn test_enumerable_identities_lists_everything() {
    assert_eq!(Two.enumerable_identities().len(), 2);
    assert!(Two.buildable_identities(&TypeDescriptor::of::<String>()).is_empty());
}

#[test]
fn test_producer_debug_shows_name() {
    let producer: Arc<dyn Producer> = Arc::new(Two);

    assert!(format!("{producer:?}").contains("two"));
}
