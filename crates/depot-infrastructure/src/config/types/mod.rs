//! Configuration types

mod app;
mod logging;

pub use app::DepotConfig;
pub use logging::LoggingConfig;
