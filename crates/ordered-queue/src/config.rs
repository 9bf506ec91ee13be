//! Configuration for the ordered queue.

use serde::{Deserialize, Serialize};

/// Queue configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Slots pre-allocated in the sequence and timestamp association
    pub initial_capacity: usize,
    /// Re-check the sort invariant after every mutation (debug builds only).
    /// Each check is O(n), so mutations lose their scan-only cost when enabled.
    pub debug_invariant_checks: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            debug_invariant_checks: false,
        }
    }
}
