//! Producer Discovery Tests
//!
//! Registers one producer into the discovery registry of this test binary.

use std::sync::Arc;

use depot_application::{PRODUCERS, ProducerEntry};
use depot_infrastructure::config::ConfigBuilder;
use depot_infrastructure::container::Container;

use crate::test_utils::{string_id, string_producer, string_query};

#[linkme::distributed_slice(PRODUCERS)]
static DISCOVERED_GREETING: ProducerEntry = ProducerEntry {
    name: "integration-discovered-greeting",
    description: "Greeting registered by the discovery tests",
    factory: || Ok(Arc::new(string_producer("discovered.greeting", "discovered", 0))),
};

#[test]
fn test_discovery_registers_linked_producers() {
    let container = Container::builder().with_discovery(true).build().unwrap();

    let greeting = container
        .get_component::<String>(&string_id("discovered.greeting"))
        .unwrap();

    assert_eq!(greeting.as_str(), "discovered");
}

#[test]
fn test_discovery_disabled_by_default_on_builder() {
    let container = Container::builder().build().unwrap();

    assert!(container
        .find_one(&string_query("discovered.greeting").optional())
        .unwrap()
        .is_none());
}

#[test]
fn test_new_instance_uses_discovery() {
    let container = Container::new_instance().unwrap();

    assert!(container.find_one(&string_query("discovered.greeting")).unwrap().is_some());
}

#[test]
fn test_builder_producer_overrides_discovered_one() {
    let container = Container::builder()
        .with_discovery(true)
        .add_producer(string_producer("discovered.greeting", "explicit", 1))
        .build()
        .unwrap();

    let greeting = container
        .get_component::<String>(&string_id("discovered.greeting"))
        .unwrap();

    assert_eq!(greeting.as_str(), "explicit");
}

#[test]
fn test_config_discovery_flag_replaces_earlier_setting() {
    let config = ConfigBuilder::new().with_discovery(false).build();

    let disabled = Container::builder()
        .with_discovery(true)
        .with_config(&config)
        .build()
        .unwrap();
    let reenabled = Container::builder()
        .with_config(&config)
        .with_discovery(true)
        .build()
        .unwrap();

    assert!(disabled
        .find_one(&string_query("discovered.greeting").optional())
        .unwrap()
        .is_none());
    assert!(reenabled
        .find_one(&string_query("discovered.greeting"))
        .unwrap()
        .is_some());
}
