//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Priorities and activation key formats are defined in `depot_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "depot.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "depot";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DEPOT";

/// Separator between nested keys in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "DEPOT_LOG";

/// File name stem of rolling log files
pub const LOG_FILE_STEM: &str = "depot";

// ============================================================================
// CONTAINER CONSTANTS
// ============================================================================

/// Prefix of generated container ids
pub const CONTAINER_ID_PREFIX: &str = "depot";

/// Suffix of the id of the warehouse owned by a container
pub const WAREHOUSE_ID_SUFFIX: &str = "warehouse";

/// Name of the producer serving the `components` table of the configuration
pub const CONFIG_COMPONENTS_PRODUCER: &str = "config-components";

/// Context name under which the process-wide local overlay is stored
pub const DEFAULT_LOCAL_CONTEXT: &str = "default";
