//! Unit tests for queries

use depot_domain::{Identity, Query, QueryKind, RawType, TypeDescriptor};

fn holder_of<T>() -> TypeDescriptor {
    TypeDescriptor::named("Holder").with_arg(TypeDescriptor::of::<T>())
}

#[test]
fn test_identity_query_defaults_to_mandatory() {
    let query = Query::by_identity(Identity::of::<String>("x"));

    assert!(query.is_mandatory());
    assert!(!query.is_multiple());
    assert!(!query.optional().is_mandatory());
}

#[test]
fn test_type_query_defaults_to_optional() {
    let query = Query::by_type(TypeDescriptor::named("Plugin"));

    assert!(!query.is_mandatory());
    assert!(query.is_multiple());
    assert!(query.mandatory().is_mandatory());
}

#[test]
fn test_by_type_picks_kind_from_arguments() {
    assert!(matches!(
        Query::by_type(TypeDescriptor::named("Holder")).kind(),
        QueryKind::ByRawType(_)
    ));
    assert!(matches!(
        Query::by_type(holder_of::<i32>()).kind(),
        QueryKind::ByParameterizedType(_)
    ));
    assert!(matches!(
        Query::by_raw_type(holder_of::<i32>()).kind(),
        QueryKind::ByRawType(_)
    ));
}

#[test]
fn test_raw_type_query_matches_both_parameterizations() {
    let int_holder = Identity::new(holder_of::<i32>(), "ints");
    let long_holder = Identity::new(holder_of::<i64>(), "longs");
    let query = Query::by_raw_type(TypeDescriptor::named("Holder"));

    assert!(query.matches(&int_holder));
    assert!(query.matches(&long_holder));
}

#[test]
fn test_parameterized_query_matches_exactly_one() {
    let int_holder = Identity::new(holder_of::<i32>(), "ints");
    let long_holder = Identity::new(holder_of::<i64>(), "longs");
    let query = Query::by_type(holder_of::<i32>());

    assert!(query.matches(&int_holder));
    assert!(!query.matches(&long_holder));
}

#[test]
fn test_raw_type_query_matches_supertypes() {
    let smtp = Identity::new(
        TypeDescriptor::new(RawType::named("SmtpMailer").extends("Mailer")),
        "smtp",
    );

    assert!(Query::by_type(TypeDescriptor::named("Mailer")).matches(&smtp));
    assert!(Query::by_type(TypeDescriptor::any()).matches(&smtp));
    assert!(!Query::by_type(TypeDescriptor::named("Queue")).matches(&smtp));
}

#[test]
fn test_identity_query_matches_only_its_identity() {
    let query = Query::by_identity(Identity::of::<String>("a"));

    assert!(query.matches(&Identity::of::<String>("a")));
    assert!(!query.matches(&Identity::of::<String>("b")));
    assert!(!query.matches(&Identity::of::<i32>("a")));
}

#[test]
fn test_query_display_marks_optional() {
    let query = Query::by_type(TypeDescriptor::named("Plugin"));

    assert_eq!(query.to_string(), "raw type Plugin (optional)");
    assert_eq!(
        Query::by_identity(Identity::new(TypeDescriptor::named("Mailer"), "smtp")).to_string(),
        "Mailer[smtp]"
    );
}
