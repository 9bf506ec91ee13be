//! Domain invariants for the ordered queue.

use super::entities::{ItemId, Keyed};
use super::queue::OrderedQueue;
use super::value_objects::OrderKey;
use crate::ports::outbound::TimeSource;
use std::collections::HashSet;

/// INVARIANT-1: Sort Order
/// Every adjacent pair is ordered by timestamp, then key.
/// An item without a recorded timestamp fails the check.
pub fn invariant_sorted<T: Keyed, C: TimeSource>(queue: &OrderedQueue<T, C>) -> bool {
    let mut previous: Option<OrderKey<'_>> = None;

    for item in queue.iter() {
        let Some(timestamp) = queue.timestamp_of(item) else {
            return false;
        };
        let current = OrderKey::new(timestamp, item.key());
        if previous.is_some_and(|prev| prev > current) {
            return false;
        }
        previous = Some(current);
    }

    true
}

/// INVARIANT-2: Association Completeness
/// Each queued item appears once and has a timestamp, and the association
/// holds nothing for items that have left the queue.
pub fn invariant_association_complete<T: Keyed, C: TimeSource>(
    queue: &OrderedQueue<T, C>,
) -> bool {
    let mut seen = HashSet::with_capacity(queue.len());

    for item in queue.iter() {
        if !seen.insert(ItemId::of(item)) || queue.timestamp_of(item).is_none() {
            return false;
        }
    }

    queue.association_len() == queue.len()
}
