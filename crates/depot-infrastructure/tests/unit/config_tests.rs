//! Configuration Loader Tests

use depot_infrastructure::config::loader::validate_config;
use depot_infrastructure::config::{ConfigBuilder, ConfigLoader, DepotConfig, LoggingConfig};
use depot_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = DepotConfig::default();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(config.activation.is_empty());
    assert!(config.components.is_empty());
    assert!(config.discovery);
}

#[test]
fn test_config_loader_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(config.discovery);
}

#[test]
fn test_config_loader_reads_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("depot.toml");
    std::fs::write(
        &config_path,
        r#"
discovery = false

[logging]
level = "debug"

[activation]
"mail.transport" = "mock"

[components]
"app.name" = "demo"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert!(!config.discovery);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.activation.get("mail.transport").map(String::as_str), Some("mock"));
    assert_eq!(config.components.get("app.name").map(String::as_str), Some("demo"));
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");
    let loader = ConfigLoader::new();

    let original = ConfigBuilder::new()
        .with_activation("depot.activation::Mailer::smtp", "false")
        .with_component("app.name", "demo")
        .with_discovery(false)
        .build();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert_eq!(loaded.activation, original.activation);
    assert_eq!(loaded.components, original.components);
    assert!(!loaded.discovery);
}

#[test]
fn test_config_loader_rejects_invalid_log_level() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let result = ConfigLoader::new().with_config_path(&config_path).load();

    assert!(result.is_err());
}

#[test]
fn test_validate_config_rejects_empty_keys() {
    let empty_activation = ConfigBuilder::new().with_activation("  ", "on").build();
    let empty_component = ConfigBuilder::new().with_component("", "value").build();

    assert!(validate_config(&empty_activation).is_err());
    assert!(validate_config(&empty_component).is_err());
    assert!(validate_config(&DepotConfig::default()).is_ok());
}

#[test]
fn test_config_builder_logging() {
    let logging = LoggingConfig {
        level: "warn".to_string(),
        json_format: true,
        file_output: None,
    };

    let config = ConfigBuilder::new().with_logging(logging.clone()).build();

    assert_eq!(config.logging, logging);
}

#[test]
fn test_config_loader_path_accessor() {
    let loader = ConfigLoader::new().with_config_path("/tmp/depot.toml");
    assert_eq!(
        loader.config_path().map(|p| p.to_string_lossy().into_owned()),
        Some("/tmp/depot.toml".to_string())
    );
    assert!(ConfigLoader::new().config_path().is_none());
}
