//! Engine port

use depot_domain::{BillOfMaterials, BoxPolicy, Identity, NamedComponent, Result, SatisfiedBom};

/// Build function for one identity plus the dependencies it needs
///
/// The bill of materials is static: containers read it for satisfiability
/// and cycle pre-checks before any build starts. `build` runs synchronously
/// on the requesting thread and may block (opening a connection, reading
/// a file); the container imposes no timeout.
pub trait Engine: Send + Sync {
    /// Identity this engine builds
    fn identity(&self) -> &Identity;

    /// Priority given to the built component
    fn priority(&self) -> i32;

    /// Queries that must be resolved before `build`
    fn bill_of_materials(&self) -> &BillOfMaterials;

    /// Build the component from its resolved dependencies
    fn build(&self, satisfied: &SatisfiedBom) -> Result<NamedComponent>;

    /// Reuse policy of the built component
    fn box_policy(&self) -> BoxPolicy {
        BoxPolicy::Boundless
    }
}
