//! Warehouses
//!
//! | Warehouse | Role |
//! |-----------|------|
//! | [`StdWarehouse`] | Concurrent store owned by one container, chaining provider warehouses |
//! | [`FilteredWarehouse`] | Read-only view of another warehouse hiding some identities or types |

mod filtered;
mod standard;

pub use filtered::FilteredWarehouse;
pub use standard::StdWarehouse;
