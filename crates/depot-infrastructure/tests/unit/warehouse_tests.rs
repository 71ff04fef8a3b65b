//! Warehouse Tests

use std::sync::Arc;
use std::time::Duration;

use depot_application::Warehouse;
use depot_domain::{BoxPolicy, Component, Identity, NamedComponent, TypeDescriptor};
use depot_infrastructure::boxes::box_component;
use depot_infrastructure::warehouse::{FilteredWarehouse, StdWarehouse};

use crate::test_utils::{CloseLog, Resource, resource_component, resource_id};

fn check_in(warehouse: &dyn Warehouse, component: NamedComponent, policy: BoxPolicy) {
    warehouse
        .check_in(box_component(component, policy), Vec::new(), Duration::ZERO)
        .unwrap();
}

#[test]
fn test_boundless_checkout_reuses_instance() {
    let warehouse = StdWarehouse::new("test");
    let component = NamedComponent::of(Identity::of::<String>("a"), "a".to_string());
    check_in(&warehouse, component.clone(), BoxPolicy::Boundless);

    let first = warehouse.check_out(component.identity()).unwrap();
    let second = warehouse.check_out(component.identity()).unwrap();

    assert!(first.same_instance(&second));
    assert_eq!(warehouse.len(), 1);
}

#[test]
fn test_disposable_checkout_removes_box() {
    let warehouse = StdWarehouse::new("test");
    let identity = Identity::of::<String>("d");
    check_in(
        &warehouse,
        NamedComponent::of(identity.clone(), "d".to_string()),
        BoxPolicy::Disposable,
    );

    assert!(warehouse.check_out(&identity).is_some());
    assert!(warehouse.check_out(&identity).is_none());
    assert!(warehouse.is_empty());
}

#[test]
fn test_check_in_records_dependencies() {
    let warehouse = StdWarehouse::new("test");
    let identity = Identity::of::<String>("service");
    let dependency = Identity::of::<String>("config");
    warehouse
        .check_in(
            box_component(NamedComponent::of(identity.clone(), "s".to_string()), BoxPolicy::Boundless),
            vec![dependency.clone()],
            Duration::from_millis(3),
        )
        .unwrap();

    assert_eq!(warehouse.list_dependencies(&identity), vec![dependency]);
    assert_eq!(
        warehouse.stored_box(&identity).unwrap().build_duration,
        Duration::from_millis(3)
    );
}

#[test]
fn test_providers_are_consulted_but_not_listed() {
    let provider: Arc<dyn Warehouse> = Arc::new(StdWarehouse::new("provider"));
    let inherited = NamedComponent::of(Identity::of::<String>("inherited"), "p".to_string());
    check_in(provider.as_ref(), inherited.clone(), BoxPolicy::Boundless);

    let warehouse = StdWarehouse::with_providers("child", vec![provider]);

    let found = warehouse.check_out(inherited.identity()).unwrap();
    assert!(found.same_instance(&inherited));
    assert!(warehouse.stored_box(inherited.identity()).is_some());
    assert!(warehouse.list_names().is_empty());
}

#[test]
fn test_list_names_in_check_in_order() {
    let warehouse = StdWarehouse::new("test");
    for name in ["first", "second", "third"] {
        check_in(
            &warehouse,
            NamedComponent::of(Identity::of::<String>(name), name.to_string()),
            BoxPolicy::Boundless,
        );
    }

    let names: Vec<String> = warehouse
        .list_names()
        .iter()
        .map(|identity| identity.name().to_string())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_close_in_reverse_order_tolerating_failures() {
    let log = CloseLog::new();
    let warehouse = StdWarehouse::new("test");
    check_in(&warehouse, resource_component("db", &log), BoxPolicy::Boundless);
    check_in(
        &warehouse,
        NamedComponent::new(
            resource_id("broken"),
            0,
            Component::closeable(Resource::failing("broken", &log)),
        ),
        BoxPolicy::Boundless,
    );
    check_in(&warehouse, resource_component("cache", &log), BoxPolicy::Boundless);

    warehouse.close();

    assert_eq!(log.closed(), vec!["cache", "broken", "db"]);
    assert!(warehouse.is_empty());
}

#[test]
fn test_close_leaves_providers_untouched() {
    let log = CloseLog::new();
    let provider = Arc::new(StdWarehouse::new("provider"));
    check_in(provider.as_ref(), resource_component("shared", &log), BoxPolicy::Boundless);
    let warehouse = StdWarehouse::with_providers("child", vec![provider.clone() as Arc<dyn Warehouse>]);
    check_in(&warehouse, resource_component("own", &log), BoxPolicy::Boundless);

    warehouse.close();

    assert_eq!(log.closed(), vec!["own"]);
    assert_eq!(provider.len(), 1);
}

#[test]
fn test_check_in_replacing_box_closes_previous() {
    let log = CloseLog::new();
    let warehouse = StdWarehouse::new("test");
    check_in(&warehouse, resource_component("conn", &log), BoxPolicy::Boundless);
    check_in(&warehouse, resource_component("conn", &log), BoxPolicy::Boundless);

    assert_eq!(log.closed(), vec!["conn"]);
    assert_eq!(warehouse.len(), 1);
}

#[test]
fn test_filtered_warehouse_hides_excluded_entries() {
    let parent = Arc::new(StdWarehouse::new("parent"));
    let kept = Identity::of::<String>("kept");
    let hidden = Identity::of::<String>("hidden");
    let number = Identity::of::<u64>("number");
    check_in(parent.as_ref(), NamedComponent::of(kept.clone(), "k".to_string()), BoxPolicy::Boundless);
    check_in(parent.as_ref(), NamedComponent::of(hidden.clone(), "h".to_string()), BoxPolicy::Boundless);
    check_in(parent.as_ref(), NamedComponent::of(number.clone(), 42_u64), BoxPolicy::Boundless);

    let view = FilteredWarehouse::new(parent.clone() as Arc<dyn Warehouse>)
        .excluding_identity(hidden.clone())
        .excluding_type(TypeDescriptor::of::<u64>());

    assert!(view.check_out(&kept).is_some());
    assert!(view.check_out(&hidden).is_none());
    assert!(view.check_out(&number).is_none());
    assert_eq!(view.list_names(), vec![kept]);
    assert_eq!(view.id(), "parent-filtered");
}

#[test]
fn test_filtered_warehouse_is_read_only() {
    let log = CloseLog::new();
    let parent = Arc::new(StdWarehouse::new("parent"));
    check_in(parent.as_ref(), resource_component("shared", &log), BoxPolicy::Boundless);
    let single_use = Identity::of::<String>("single-use");
    check_in(
        parent.as_ref(),
        NamedComponent::of(single_use.clone(), "x".to_string()),
        BoxPolicy::Disposable,
    );
    let view = FilteredWarehouse::new(parent.clone() as Arc<dyn Warehouse>);

    let rejected = view.check_in(
        box_component(NamedComponent::of(Identity::of::<String>("new"), "n".to_string()), BoxPolicy::Boundless),
        Vec::new(),
        Duration::ZERO,
    );
    view.close();

    assert!(rejected.is_err());
    assert!(view.check_out(&single_use).is_none());
    assert!(log.closed().is_empty());
    assert_eq!(parent.len(), 2);
}
