//! Unit tests for bills of materials

use depot_domain::{BillOfMaterials, Identity, NamedComponent, Query, SatisfiedBom, TypeDescriptor};

fn named(name: &'static str, value: &str) -> NamedComponent {
    NamedComponent::of(Identity::of::<String>(name), value.to_string())
}

#[test]
fn test_bill_of_materials_drops_duplicates() {
    let query = Query::by_identity(Identity::of::<String>("a"));
    let bom = BillOfMaterials::of([query.clone(), query.clone()]);

    assert_eq!(bom.len(), 1);
    assert_eq!(bom.queries(), &[query]);
}

#[test]
fn test_merge_keeps_declaration_order() {
    let a = Query::by_identity(Identity::of::<String>("a"));
    let b = Query::by_identity(Identity::of::<String>("b"));
    let merged = BillOfMaterials::of([a.clone()]).merge(&BillOfMaterials::of([b.clone(), a.clone()]));

    assert_eq!(merged.queries(), &[a, b]);
}

#[test]
fn test_satisfied_bom_lookup() {
    let one = Query::by_identity(Identity::of::<String>("a"));
    let many = Query::by_type(TypeDescriptor::of::<String>());
    let satisfied = SatisfiedBom::empty()
        .with(one.clone(), vec![named("a", "first")])
        .with(many.clone(), vec![named("a", "first"), named("b", "second")]);

    assert_eq!(
        satisfied.one_as::<String>(&one).expect("a string").as_deref(),
        Some(&"first".to_string())
    );
    assert_eq!(satisfied.all(&many).len(), 2);
    assert_eq!(satisfied.all_as::<String>(&many).expect("strings").len(), 2);
}

#[test]
fn test_absent_optional_slot_is_none() {
    let optional = Query::by_identity(Identity::of::<String>("missing")).optional();
    let satisfied = SatisfiedBom::empty().with(optional.clone(), Vec::new());

    assert!(satisfied.one(&optional).is_none());
    assert!(satisfied.one_as::<String>(&optional).expect("no mismatch").is_none());
    assert!(satisfied.require::<String>(&optional).is_err());
}

#[test]
fn test_dependencies_are_unique_in_resolution_order() {
    let one = Query::by_identity(Identity::of::<String>("b"));
    let many = Query::by_type(TypeDescriptor::of::<String>());
    let satisfied = SatisfiedBom::empty()
        .with(one, vec![named("b", "x")])
        .with(many, vec![named("a", "y"), named("b", "x")]);

    assert_eq!(
        satisfied.dependencies(),
        vec![Identity::of::<String>("b"), Identity::of::<String>("a")]
    );
}
