//! Component customizer ports
//!
//! Customizers decorate components after they are built and before they are
//! stored: wrapping a value, adjusting its priority, registering it
//! somewhere.

use std::sync::Arc;

use depot_domain::{Identity, NamedComponent, Result};

/// Transformation applied to a freshly built component
pub trait ComponentCustomizer: Send + Sync {
    /// Customizers run by ascending priority
    fn priority(&self) -> i32 {
        0
    }

    /// Return the customized component
    fn customize(&self, component: NamedComponent) -> Result<NamedComponent>;
}

/// Source of customizers for the identities it accepts
pub trait CustomizerEngine: Send + Sync {
    /// Name used in dumps
    fn name(&self) -> &str;

    /// Whether components of `identity` are customized
    fn can_customize(&self, identity: &Identity) -> bool;

    /// Customizer for `identity`
    fn customizer_for(&self, identity: &Identity) -> Arc<dyn ComponentCustomizer>;
}
