//! Simulation tick timestamp

use serde::{Deserialize, Serialize};

/// Timestamp of one simulation tick
///
/// Supplied by the tick broadcaster, one per simulation step.
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Monotonic frame index
    pub frame: u64,

    /// Elapsed simulation time (seconds)
    pub elapsed_seconds: f64,
}

impl Timestamp {
    /// Create a new timestamp
    pub fn new(frame: u64, elapsed_seconds: f64) -> Self {
        Self {
            frame,
            elapsed_seconds,
        }
    }
}
