//! Timing instrumentation helpers

use std::time::{Duration, Instant};

/// Tracks how long a component build takes
///
/// # Example
///
/// ```ignore
/// use depot_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let component = engine.build(&satisfied)?;
/// warehouse.check_in(boxed, dependencies, timer.elapsed())?;
/// ```
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
