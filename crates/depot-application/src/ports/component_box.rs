//! Component box port

use depot_domain::{BoxPolicy, Identity, NamedComponent, Result};

/// A built component together with its reuse policy
pub trait ComponentBox: Send + Sync {
    /// Identity of the boxed component
    fn identity(&self) -> &Identity;

    /// Reuse policy
    fn policy(&self) -> BoxPolicy;

    /// Take the component out of the box
    ///
    /// Boundless boxes return the same instance on every call, disposable
    /// boxes return it once and `None` afterwards.
    fn pick(&self) -> Option<NamedComponent>;

    /// Release the boxed value if it is closeable
    fn close(&self) -> Result<()>;
}
