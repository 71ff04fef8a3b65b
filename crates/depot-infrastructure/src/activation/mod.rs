//! Activation sources and per-container activation snapshots
//!
//! Activation values decide which alternatives and conditional producers a
//! container registers, and which identities are deactivated (their
//! activation key reads `"false"`).

mod snapshot;
mod sources;

pub use snapshot::ActivationSnapshot;
pub use sources::{
    EnvActivationSource, LayeredActivationSource, MapActivationSource, NoActivation,
};
