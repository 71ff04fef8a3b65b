//! Alternative and Condition Tests

use std::sync::Arc;

use depot_application::Producer;
use depot_domain::{Identity, RawType, SatisfiedBom, TypeDescriptor};
use depot_infrastructure::activation::{ActivationSnapshot, MapActivationSource, NoActivation};
use depot_infrastructure::alternative::{Alternative, AlternativeTarget, Condition};
use depot_infrastructure::engines::StdEngine;
use depot_infrastructure::producers::SingleIdentityProducer;

use crate::test_utils::{string_id, string_producer};

fn snapshot(key: &str, value: &str) -> ActivationSnapshot {
    ActivationSnapshot::new(Arc::new(MapActivationSource::new().with(key, value)))
}

#[test]
fn test_condition_when_and_unless() {
    let flag_on = snapshot("F", "on");
    let empty = ActivationSnapshot::new(Arc::new(NoActivation));

    assert!(Condition::when("F", "on").is_met(&flag_on));
    assert!(!Condition::when("F", "on").is_met(&empty));
    assert!(!Condition::unless("F", "on").is_met(&flag_on));
    assert!(Condition::unless("F", "on").is_met(&empty));
    assert_eq!(Condition::when("F", "on").key(), "F");
}

#[test]
fn test_alternative_activation() {
    let alternative =
        Alternative::new(string_id("X"), Arc::new(string_producer("X", "alt", 0))).when("F", "on");

    assert!(alternative.is_active(&snapshot("F", "on")));
    assert!(!alternative.is_active(&snapshot("F", "off")));
    assert!(Alternative::new(string_id("X"), Arc::new(string_producer("X", "alt", 0)))
        .is_active(&snapshot("F", "off")));
}

#[test]
fn test_alternative_builds_target_identity() {
    let alternative =
        Alternative::new(string_id("X"), Arc::new(string_producer("X", "alt", 2))).with_priority(9);

    assert_eq!(alternative.priority(), 9);
    assert!(alternative.can_build(&string_id("X")));
    assert!(!alternative.can_build(&string_id("Y")));
    assert_eq!(alternative.target(), &AlternativeTarget::Identity(string_id("X")));
    assert_eq!(alternative.enumerable_identities(), vec![string_id("X")]);
}

#[test]
fn test_alternative_retargets_single_subtype_component() {
    let mailer = TypeDescriptor::new(RawType::named("Mailer"));
    let target = Identity::new(mailer, "mailer");
    let mock = Identity::new(
        TypeDescriptor::new(RawType::named("MockMailer").extends("Mailer")),
        "mock",
    );
    let producer = SingleIdentityProducer::new(StdEngine::value(mock, "mock mailer".to_string()));
    let alternative = Alternative::new(target.clone(), Arc::new(producer));

    assert!(alternative.can_build(&target));
    let engine = alternative.engine_for(&target).unwrap();
    let built = engine.build(&SatisfiedBom::empty()).unwrap();
    assert_eq!(built.identity(), &target);
    assert_eq!(built.value::<String>().as_deref(), Some("mock mailer"));
}

#[test]
fn test_type_alternative_covers_assignable_identities() {
    let plugin = TypeDescriptor::new(RawType::named("Plugin"));
    let fast = Identity::new(
        TypeDescriptor::new(RawType::named("FastPlugin").extends("Plugin")),
        "fast",
    );
    let producer = SingleIdentityProducer::new(StdEngine::value(fast.clone(), "fast".to_string()));
    let alternative = Alternative::new(plugin.clone(), Arc::new(producer));

    assert!(alternative.can_build(&fast));
    assert!(!alternative.can_build(&string_id("fast")));
    assert_eq!(alternative.buildable_identities(&plugin), vec![fast]);
    assert!(alternative.engine_for(&string_id("fast")).is_err());
}
