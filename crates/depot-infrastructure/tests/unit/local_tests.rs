//! Local Overlay Tests

use std::sync::Arc;

use depot_domain::{Identity, NamedComponent};
use depot_infrastructure::local::LocalProducers;

use crate::test_utils::string_producer;

#[test]
fn test_overlay_starts_empty() {
    assert!(LocalProducers::new().is_empty());
}

#[test]
fn test_clones_share_contents() {
    let overlay = LocalProducers::new();
    let alias = overlay.clone();

    alias.set_activation("flag", "on");

    assert!(!overlay.is_empty());
    assert_eq!(overlay.snapshot().activation.get("flag").map(String::as_str), Some("on"));
}

#[test]
fn test_set_component_replaces_same_identity() {
    let overlay = LocalProducers::new();
    let identity = Identity::of::<String>("greeting");

    overlay
        .set_component(NamedComponent::of(identity.clone(), "hello".to_string()))
        .set_component(NamedComponent::of(identity, "bonjour".to_string()));

    let components = overlay.snapshot().components;
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].value::<String>().as_deref(), Some("bonjour"));
}

#[test]
fn test_deactivate_sets_activation_key() {
    let overlay = LocalProducers::new();
    let identity = Identity::of::<String>("mailer");

    overlay.deactivate(&identity);

    assert_eq!(
        overlay.snapshot().activation.get(&identity.activation_key()).map(String::as_str),
        Some("false")
    );
}

#[test]
fn test_scope_clears_on_drop() {
    let overlay = LocalProducers::new();
    {
        let _scope = overlay.scoped();
        overlay.add_producer(Arc::new(string_producer("scoped", "value", 0)));
        assert!(!overlay.is_empty());
    }
    assert!(overlay.is_empty());
}

#[test]
fn test_thread_local_overlay_is_per_thread() {
    let local = LocalProducers::thread_local();
    let _scope = local.scoped();
    local.set_activation("thread.flag", "main");

    let seen_elsewhere = std::thread::spawn(|| LocalProducers::thread_local().is_empty())
        .join()
        .unwrap();

    assert!(seen_elsewhere);
    assert!(!LocalProducers::thread_local().is_empty());
}

#[test]
fn test_context_local_overlay_is_shared_by_name() {
    let name = "local-tests-shared-context";
    LocalProducers::context_local(name).set_activation("ctx.flag", "on");

    let seen_elsewhere = std::thread::spawn(move || LocalProducers::context_local(name).is_empty())
        .join()
        .unwrap();

    assert!(!seen_elsewhere);
    LocalProducers::remove_context(name);
    assert!(LocalProducers::context_local(name).is_empty());
    LocalProducers::remove_context(name);
}
