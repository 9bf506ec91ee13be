//! Core domain entities for the ordered queue.
//!
//! Items are held behind `Arc` handles. The handle's allocation is the
//! item's identity; two handles with equal contents are distinct items.

use std::sync::Arc;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Capability every queued item must provide: a string key, unique within
/// the queue, used to break ties between equal timestamps.
pub trait Keyed {
    /// Returns the item's key.
    fn key(&self) -> &str;
}

impl Keyed for String {
    fn key(&self) -> &str {
        self.as_str()
    }
}

impl Keyed for &'static str {
    fn key(&self) -> &str {
        self
    }
}

/// Identity of a queued item, derived from its `Arc` allocation.
///
/// Holds no reference to the item, so it never keeps an item alive. The
/// address stays unique for as long as the queue owns a handle to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    /// Derives the identity of an item handle.
    pub fn of<T>(item: &Arc<T>) -> Self {
        Self(Arc::as_ptr(item) as *const () as usize)
    }
}
