//! Top-level configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

/// Depot configuration
///
/// ```toml
/// discovery = true
///
/// [logging]
/// level = "debug"
///
/// [activation]
/// "depot.activation::Mailer::smtp" = "false"
/// "mail.transport" = "mock"
///
/// [components]
/// "app.name" = "demo"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    /// Logging setup
    pub logging: LoggingConfig,

    /// Activation flags, read by alternatives and component deactivation
    pub activation: BTreeMap<String, String>,

    /// Named `String` components served by the configuration producer
    pub components: BTreeMap<String, String>,

    /// Register the producers found in the discovery registry
    pub discovery: bool,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            activation: BTreeMap::new(),
            components: BTreeMap::new(),
            discovery: true,
        }
    }
}
