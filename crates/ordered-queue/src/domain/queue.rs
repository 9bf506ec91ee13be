//! # Ordered Queue - Timestamp Ordering with Key Tie-Break
//!
//! ## Data Structures
//!
//! - `items`: the ordered sequence, front = earliest
//! - `timestamps`: identity -> recorded timestamp association
//!
//! ## Ordering
//!
//! Adjacent items `a`, `b` satisfy `ts(a) < ts(b)`, or `ts(a) == ts(b)` and
//! `key(a) <= key(b)`.
//!
//! ## Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `enqueue` | O(k) backward scan, k = items newer than the new one |
//! | `dequeue` | O(n) shift |
//! | `position` | O(log n) |
//! | `remove` / `requeue` | O(log n) search + O(n) splice |
//!
//! `QueueConfig::debug_invariant_checks` adds an O(n) sort check to every
//! mutation in debug builds.

use super::entities::{ItemId, Keyed, Timestamp};
use super::errors::QueueError;
use super::invariants::invariant_sorted;
use super::value_objects::{OrderKey, QueueStatus};
use crate::config::QueueConfig;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Queue of keyed items ordered by (timestamp, key).
///
/// Items are shared handles; identity is the `Arc` allocation. The queue
/// owns one handle per queued item and drops its association entry as soon
/// as the item leaves the sequence.
///
/// Not internally synchronized. Wrap the whole queue in a lock to share it.
#[derive(Debug)]
pub struct OrderedQueue<T, C = SystemTimeSource> {
    /// Configuration.
    config: QueueConfig,

    /// Items in order.
    items: Vec<Arc<T>>,

    /// Timestamp recorded for each queued item.
    timestamps: HashMap<ItemId, Timestamp>,

    /// Clock used when no timestamp is supplied.
    clock: C,
}

impl<T: Keyed> OrderedQueue<T> {
    /// Creates an empty queue reading the system clock.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates an empty queue with the given configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        Self::with_config_and_time_source(config, SystemTimeSource)
    }
}

impl<T: Keyed> Default for OrderedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed, C: TimeSource> OrderedQueue<T, C> {
    /// Creates an empty queue reading time from `clock`.
    pub fn with_time_source(clock: C) -> Self {
        Self::with_config_and_time_source(QueueConfig::default(), clock)
    }

    /// Creates an empty queue with explicit configuration and clock.
    pub fn with_config_and_time_source(config: QueueConfig, clock: C) -> Self {
        Self {
            items: Vec::with_capacity(config.initial_capacity),
            timestamps: HashMap::with_capacity(config.initial_capacity),
            config,
            clock,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the ordered sequence.
    pub fn list(&self) -> &[Arc<T>] {
        &self.items
    }

    /// Iterates over items from front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }

    /// Returns the front item without removing it.
    pub fn peek(&self) -> Option<&Arc<T>> {
        self.items.first()
    }

    /// Returns the timestamp recorded for `item`, if it is queued.
    pub fn timestamp_of(&self, item: &Arc<T>) -> Option<Timestamp> {
        self.timestamps.get(&ItemId::of(item)).copied()
    }

    /// Returns a status snapshot.
    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            len: self.items.len(),
            oldest: self.items.first().and_then(|item| self.timestamp_of(item)),
            newest: self.items.last().and_then(|item| self.timestamp_of(item)),
        }
    }

    /// Inserts `item` at the position matching its timestamp.
    ///
    /// A timestamp already recorded for this item takes precedence over
    /// `timestamp`; otherwise `timestamp` is used, or the current time when
    /// `None`.
    ///
    /// # Errors
    /// - `MissingTimestamp` if a scanned item has no recorded timestamp.
    ///   Nothing is modified in that case.
    pub fn enqueue(
        &mut self,
        item: Arc<T>,
        timestamp: Option<Timestamp>,
    ) -> Result<(), QueueError> {
        let timestamp = match self.timestamp_of(&item) {
            Some(recorded) => {
                warn!(
                    key = item.key(),
                    recorded, "item is already queued; keeping its recorded timestamp"
                );
                recorded
            }
            None => timestamp.unwrap_or_else(|| self.clock.now()),
        };

        self.insert(item, timestamp)
    }

    /// Removes and returns the front item.
    pub fn dequeue(&mut self) -> Option<Arc<T>> {
        if self.items.is_empty() {
            return None;
        }

        let item = self.items.remove(0);
        self.timestamps.remove(&ItemId::of(&item));
        debug!(key = item.key(), remaining = self.items.len(), "dequeued item");
        Some(item)
    }

    /// Moves `item` to the position matching a new timestamp.
    ///
    /// The item is removed if present, then inserted with `timestamp`, or
    /// the current time when `None`. Enqueues the item if it was not queued.
    ///
    /// # Errors
    /// - `MissingTimestamp` from the search or the insertion scan.
    ///   Nothing is modified in that case.
    pub fn requeue(
        &mut self,
        item: Arc<T>,
        timestamp: Option<Timestamp>,
    ) -> Result<(), QueueError> {
        let timestamp = timestamp.unwrap_or_else(|| self.clock.now());
        let current = self.position(&item)?;
        let index = self.insertion_point(OrderKey::new(timestamp, item.key()), current)?;

        if let Some(current) = current {
            self.items.remove(current);
        }
        debug!(key = item.key(), timestamp, from = current, index, "requeued item");

        self.timestamps.insert(ItemId::of(&item), timestamp);
        self.items.insert(index, item);
        self.check_invariants();
        Ok(())
    }

    /// Removes `item` wherever it sits.
    ///
    /// Returns `false` if the item is not queued.
    ///
    /// # Errors
    /// - `MissingTimestamp` from the search.
    pub fn remove(&mut self, item: &Arc<T>) -> Result<bool, QueueError> {
        let Some(index) = self.position(item)? else {
            trace!(key = item.key(), "item not queued; nothing to remove");
            return Ok(false);
        };

        let removed = self.items.remove(index);
        self.timestamps.remove(&ItemId::of(&removed));
        debug!(key = removed.key(), index, "removed item");
        self.check_invariants();
        Ok(true)
    }

    /// Checks whether `item` is queued.
    pub fn contains(&self, item: &Arc<T>) -> Result<bool, QueueError> {
        Ok(self.position(item)?.is_some())
    }

    /// Finds the index of `item` by binary search.
    ///
    /// Identity is checked at every midpoint before ordering is compared.
    /// Returns `None` for items without a recorded timestamp.
    ///
    /// # Errors
    /// - `MissingTimestamp` if a probed item has no recorded timestamp.
    pub fn position(&self, item: &Arc<T>) -> Result<Option<usize>, QueueError> {
        let id = ItemId::of(item);
        let Some(&timestamp) = self.timestamps.get(&id) else {
            return Ok(None);
        };
        let needle = OrderKey::new(timestamp, item.key());

        let (mut low, mut high) = (0, self.items.len());
        while low < high {
            let mid = low + (high - low) / 2;
            if ItemId::of(&self.items[mid]) == id {
                return Ok(Some(mid));
            }

            match needle.cmp(&self.order_key_at(mid)?) {
                Ordering::Greater => low = mid + 1,
                Ordering::Less => high = mid,
                Ordering::Equal => return self.find_in_equal_run(mid, needle, id),
            }
        }

        Ok(None)
    }

    /// Dequeues every item with a timestamp at or before `until`, in order.
    ///
    /// # Errors
    /// - `MissingTimestamp` if a front item has no recorded timestamp.
    ///   Nothing is removed in that case.
    pub fn drain_until(&mut self, until: Timestamp) -> Result<Vec<Arc<T>>, QueueError> {
        let mut split = 0;
        while split < self.items.len() && self.timestamp_at(split)? <= until {
            split += 1;
        }

        let drained: Vec<Arc<T>> = self.items.drain(..split).collect();
        for item in &drained {
            self.timestamps.remove(&ItemId::of(item));
        }
        if !drained.is_empty() {
            debug!(count = drained.len(), until, "drained due items");
        }
        Ok(drained)
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.timestamps.clear();
    }

    /// Number of entries in the timestamp association.
    pub(crate) fn association_len(&self) -> usize {
        self.timestamps.len()
    }

    /// Inserts with a resolved timestamp, bypassing the recorded-timestamp lookup.
    fn insert(&mut self, item: Arc<T>, timestamp: Timestamp) -> Result<(), QueueError> {
        let index = self.insertion_point(OrderKey::new(timestamp, item.key()), None)?;
        debug!(key = item.key(), timestamp, index, "enqueued item");

        self.timestamps.insert(ItemId::of(&item), timestamp);
        self.items.insert(index, item);
        self.check_invariants();
        Ok(())
    }

    /// Scans backward from the tail for the first item ordered strictly
    /// before `new`, returning the index just after it.
    ///
    /// The item at `skip` is ignored and the result is an index into the
    /// sequence as it will be once that item is removed.
    fn insertion_point(
        &self,
        new: OrderKey<'_>,
        skip: Option<usize>,
    ) -> Result<usize, QueueError> {
        let mut index = self.items.len();
        while index > 0 {
            if Some(index - 1) != skip && new > self.order_key_at(index - 1)? {
                break;
            }
            index -= 1;
        }
        trace!(
            scanned = self.items.len() - index,
            index,
            "found insertion point"
        );

        match skip {
            Some(skip) if skip < index => Ok(index - 1),
            _ => Ok(index),
        }
    }

    /// Probes both neighbours of `mid` across items ordered equal to `needle`.
    fn find_in_equal_run(
        &self,
        mid: usize,
        needle: OrderKey<'_>,
        id: ItemId,
    ) -> Result<Option<usize>, QueueError> {
        for index in (0..mid).rev() {
            if ItemId::of(&self.items[index]) == id {
                return Ok(Some(index));
            }
            if self.order_key_at(index)? != needle {
                break;
            }
        }
        for index in mid + 1..self.items.len() {
            if ItemId::of(&self.items[index]) == id {
                return Ok(Some(index));
            }
            if self.order_key_at(index)? != needle {
                break;
            }
        }
        Ok(None)
    }

    fn order_key_at(&self, index: usize) -> Result<OrderKey<'_>, QueueError> {
        Ok(OrderKey::new(
            self.timestamp_at(index)?,
            self.items[index].key(),
        ))
    }

    fn timestamp_at(&self, index: usize) -> Result<Timestamp, QueueError> {
        let item = &self.items[index];
        self.timestamps
            .get(&ItemId::of(item))
            .copied()
            .ok_or_else(|| {
                error!(key = item.key(), index, "queued item has no recorded timestamp");
                QueueError::MissingTimestamp {
                    key: item.key().to_string(),
                    index,
                }
            })
    }

    fn check_invariants(&self) {
        if !cfg!(debug_assertions) || !self.config.debug_invariant_checks {
            return;
        }
        if !invariant_sorted(self) {
            error!(len = self.items.len(), "queue sort invariant violated");
        }
    }

    /// Drops the association entry of `item` while leaving it in the sequence.
    #[cfg(test)]
    pub(crate) fn forget_timestamp(&mut self, item: &Arc<T>) {
        self.timestamps.remove(&ItemId::of(item));
    }
}

impl<'a, T: Keyed, C: TimeSource> IntoIterator for &'a OrderedQueue<T, C> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
