//! Activation Tests

use std::sync::Arc;

use depot_domain::{Query, TypeDescriptor};
use depot_infrastructure::activation::MapActivationSource;
use depot_infrastructure::alternative::{Alternative, Condition};
use depot_infrastructure::config::ConfigBuilder;
use depot_infrastructure::container::{Container, ContainerBuilder};

use crate::test_utils::{string_id, string_producer, string_query};

fn with_alternative() -> ContainerBuilder {
    Container::builder()
        .add_producer(string_producer("X", "regular", 0))
        .add_alternative(
            Alternative::new(string_id("X"), Arc::new(string_producer("X", "alternative", 0)))
                .when("F", "on"),
        )
}

fn value(container: &Container, name: &'static str) -> String {
    container
        .get_component::<String>(&string_id(name))
        .unwrap()
        .as_ref()
        .clone()
}

#[test]
fn test_alternative_used_when_flag_on() {
    let container = with_alternative()
        .with_activation_source(Arc::new(MapActivationSource::new().with("F", "on")))
        .build()
        .unwrap();

    assert_eq!(value(&container, "X"), "alternative");
}

#[test]
fn test_regular_producer_used_when_flag_off() {
    let off = with_alternative()
        .with_activation_source(Arc::new(MapActivationSource::new().with("F", "off")))
        .build()
        .unwrap();
    let unset = with_alternative().build().unwrap();

    assert_eq!(value(&off, "X"), "regular");
    assert_eq!(value(&unset, "X"), "regular");
}

#[test]
fn test_later_activation_sources_take_precedence() {
    let container = with_alternative()
        .with_activation_source(Arc::new(MapActivationSource::new().with("F", "off")))
        .with_activation_source(Arc::new(MapActivationSource::new().with("F", "on")))
        .build()
        .unwrap();
    let overridden = with_alternative()
        .with_activation_source(Arc::new(MapActivationSource::new().with("F", "on")))
        .with_activation("F", "off")
        .build()
        .unwrap();

    assert_eq!(value(&container, "X"), "alternative");
    assert_eq!(value(&overridden, "X"), "regular");
}

#[test]
fn test_conditional_producer() {
    let builder = || {
        Container::builder().add_conditional(
            Arc::new(string_producer("debug.banner", "on", 0)),
            Condition::unless("profile", "prod"),
        )
    };

    let dev = builder().build().unwrap();
    let prod = builder().with_activation("profile", "prod").build().unwrap();

    assert_eq!(value(&dev, "debug.banner"), "on");
    assert!(prod.find_one(&string_query("debug.banner").optional()).unwrap().is_none());
}

#[test]
fn test_deactivated_identity_is_absent() {
    let container = Container::builder()
        .add_producer(string_producer("mailer", "smtp", 0))
        .add_producer(string_producer("logger", "stdout", 0))
        .deactivate(&string_id("mailer"))
        .build()
        .unwrap();

    assert!(container.find_one(&string_query("mailer").optional()).unwrap().is_none());
    assert!(container.must_get(&string_query("mailer")).unwrap_err().is_missing_dependency());
    assert_eq!(
        container.find_identities(&Query::by_type(TypeDescriptor::of::<String>())),
        vec![string_id("logger")]
    );
}

#[test]
fn test_deactivation_hides_inherited_components() {
    let parent = Container::builder()
        .add_producer(string_producer("mailer", "smtp", 0))
        .build()
        .unwrap();
    parent.must_get(&string_query("mailer")).unwrap();

    let child = Container::builder()
        .add_warehouse_provider(Arc::new(parent.filtered_warehouse()))
        .deactivate(&string_id("mailer"))
        .build()
        .unwrap();

    assert!(child.find_one(&string_query("mailer").optional()).unwrap().is_none());
    assert!(child.find(&Query::of::<String>()).unwrap().is_empty());
}

#[test]
fn test_config_drives_components_and_activation() {
    let config = ConfigBuilder::new()
        .with_component("app.name", "demo")
        .with_activation("F", "on")
        .with_discovery(false)
        .build();

    let container = with_alternative().with_config(&config).build().unwrap();

    assert_eq!(value(&container, "app.name"), "demo");
    assert_eq!(value(&container, "X"), "alternative");
}
