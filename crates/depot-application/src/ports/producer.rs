//! Producer port

use std::sync::Arc;

use depot_domain::{Identity, Result, TypeDescriptor};

use super::engine::Engine;

/// A registered unit able to build components for one or more identities
///
/// # Contract
///
/// - `can_build` and `engine_for` agree: `engine_for` succeeds for every
///   identity `can_build` accepts
/// - `buildable_identities` lists the identities assignable to a raw type
///   the producer knows about. Open-ended producers (config-driven
///   components) may build identities they never enumerate
/// - `priority` orders producers claiming the same identity, higher wins
///
/// # Example
///
/// ```ignore
/// struct Greeting;
///
/// impl Producer for Greeting {
///     fn name(&self) -> &str { "greeting" }
///     fn priority(&self) -> i32 { 0 }
///     fn can_build(&self, identity: &Identity) -> bool { identity == &greeting_id() }
///     fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> { ... }
///     fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> { ... }
/// }
/// ```
pub trait Producer: Send + Sync {
    /// Human-readable name used in dumps and error messages
    fn name(&self) -> &str;

    /// Precedence among producers claiming the same identity
    fn priority(&self) -> i32;

    /// Whether this producer can build `identity`
    fn can_build(&self, identity: &Identity) -> bool;

    /// Engine building `identity`
    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>>;

    /// Known identities whose raw type is assignable to `target`'s raw type
    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity>;

    /// Every identity this producer enumerates
    fn enumerable_identities(&self) -> Vec<Identity> {
        self.buildable_identities(&TypeDescriptor::any())
    }
}

impl std::fmt::Debug for dyn Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}
