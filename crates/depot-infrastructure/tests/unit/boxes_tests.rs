//! Component Box Tests

use depot_application::ComponentBox;
use depot_domain::{BoxPolicy, Identity, NamedComponent};
use depot_infrastructure::boxes::{BoundlessComponentBox, DisposableComponentBox, box_component};

use crate::test_utils::{CloseLog, resource_component};

#[test]
fn test_boundless_box_hands_out_same_instance() {
    let component = NamedComponent::of(Identity::of::<String>("shared"), "value".to_string());
    let component_box = BoundlessComponentBox::new(component.clone());

    let first = component_box.pick().unwrap();
    let second = component_box.pick().unwrap();

    assert!(first.same_instance(&second));
    assert!(first.same_instance(&component));
    assert_eq!(component_box.policy(), BoxPolicy::Boundless);
}

#[test]
fn test_disposable_box_hands_out_once() {
    let component = NamedComponent::of(Identity::of::<String>("once"), "value".to_string());
    let component_box = DisposableComponentBox::new(component);

    assert!(component_box.pick().is_some());
    assert!(component_box.pick().is_none());
    assert_eq!(component_box.identity(), &Identity::of::<String>("once"));
}

#[test]
fn test_disposable_box_close_skips_picked_component() {
    let log = CloseLog::new();
    let picked = DisposableComponentBox::new(resource_component("picked", &log));
    let unpicked = DisposableComponentBox::new(resource_component("unpicked", &log));

    let _owned = picked.pick().unwrap();
    picked.close().unwrap();
    unpicked.close().unwrap();

    assert_eq!(log.closed(), vec!["unpicked"]);
}

#[test]
fn test_boundless_box_close_releases_component() {
    let log = CloseLog::new();
    let component_box = BoundlessComponentBox::new(resource_component("pool", &log));

    component_box.close().unwrap();

    assert_eq!(log.closed(), vec!["pool"]);
}

#[test]
fn test_box_component_respects_policy() {
    let component = NamedComponent::of(Identity::of::<u32>("n"), 7_u32);

    assert_eq!(
        box_component(component.clone(), BoxPolicy::Boundless).policy(),
        BoxPolicy::Boundless
    );
    assert_eq!(
        box_component(component, BoxPolicy::Disposable).policy(),
        BoxPolicy::Disposable
    );
}
