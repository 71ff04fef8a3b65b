//! Domain layer constants
//!
//! Priorities and key formats shared by every layer. Infrastructure-specific
//! constants remain in `depot_infrastructure::constants`.

// ============================================================================
// PRIORITY CONSTANTS
// ============================================================================

/// Priority of a producer or component that does not declare one
pub const DEFAULT_PRIORITY: i32 = 0;

/// Priority of the open-ended producers backed by configuration or environment
pub const PROPERTIES_PRIORITY: i32 = -1000;

/// Priority of the producer exposing components held by provider warehouses
pub const WAREHOUSE_PROVIDERS_PRIORITY: i32 = -10000;

// ============================================================================
// ACTIVATION CONSTANTS
// ============================================================================

/// Namespace of component activation keys
pub const ACTIVATION_NAMESPACE: &str = "depot.activation";

/// Separator between the segments of an activation key
pub const ACTIVATION_KEY_SEPARATOR: &str = "::";

/// Activation value that deactivates a component
pub const DEACTIVATED_VALUE: &str = "false";

// ============================================================================
// TYPE CONSTANTS
// ============================================================================

/// Name of the root raw type every type is assignable to
pub const ANY_TYPE_NAME: &str = "*";
