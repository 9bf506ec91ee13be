//! Error types for the ordered queue.
//!
//! Absence (empty queue, unknown item) is reported through `Option`/`bool`
//! results. The variants here signal structural corruption only.

use thiserror::Error;

/// Internal-invariant faults raised by queue operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An item in the sequence has no recorded timestamp.
    #[error("Missing timestamp for queued item '{key}' at index {index}")]
    MissingTimestamp { key: String, index: usize },
}
