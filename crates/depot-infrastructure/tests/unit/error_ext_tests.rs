//! Error Extension Tests

use std::io;

use depot_domain::error::{Error, Result};
use depot_domain::Identity;
use depot_infrastructure::error_ext::ErrorContext;

fn not_found() -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[test]
fn test_context_wraps_internal_error() {
    let result: Result<()> = not_found().context("failed to read file");

    match result {
        Err(Error::Internal { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Internal error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: io::Result<u8> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 1);

    let result: Result<()> = not_found().with_context(|| format!("reading {}", "depot.toml"));
    assert!(result.unwrap_err().to_string().contains("reading depot.toml"));
}

#[test]
fn test_config_context_wraps_configuration_error() {
    let result: Result<()> = not_found().config_context("failed to load config");

    assert!(matches!(result, Err(Error::Configuration { source: Some(_), .. })));
}

#[test]
fn test_build_context_names_identity() {
    let identity = Identity::of::<u16>("port");
    let result: Result<u16> = "not-a-port".parse::<u16>().build_context(&identity);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::BuildFailure { .. }));
    assert!(err.to_string().starts_with(&format!("failed to build {identity}")));
}
