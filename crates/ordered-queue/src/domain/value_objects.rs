//! Value objects for the ordered queue.

use super::entities::Timestamp;
use std::cmp::Ordering;

/// The (timestamp, key) pair an item is sorted by.
///
/// Earlier timestamp first; ties broken by lexicographic key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderKey<'a> {
    /// Recorded timestamp.
    pub timestamp: Timestamp,
    /// Item key.
    pub key: &'a str,
}

impl<'a> OrderKey<'a> {
    /// Creates a new order key.
    pub fn new(timestamp: Timestamp, key: &'a str) -> Self {
        Self { timestamp, key }
    }
}

impl Ord for OrderKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.key.cmp(other.key))
    }
}

impl PartialOrd for OrderKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Queue status snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueStatus {
    /// Number of queued items.
    pub len: usize,
    /// Timestamp of the front item.
    pub oldest: Option<Timestamp>,
    /// Timestamp of the back item.
    pub newest: Option<Timestamp>,
}

impl QueueStatus {
    /// Span between the oldest and newest timestamps, in milliseconds.
    pub fn span_ms(&self) -> u64 {
        match (self.oldest, self.newest) {
            (Some(oldest), Some(newest)) => newest.saturating_sub(oldest),
            _ => 0,
        }
    }
}
