//! Configuration management
//!
//! TOML files, environment variables and defaults merged with `figment`.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{DepotConfig, LoggingConfig};
