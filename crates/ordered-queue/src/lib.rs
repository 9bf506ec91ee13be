//! # Ordered Queue
//!
//! A queue of keyed items ordered by an insertion timestamp, with ties broken
//! by the item's string key.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Adjacent items ordered by (timestamp, key) | `domain/queue.rs` - `insertion_point()` |
//! | INVARIANT-2 | Every queued item has exactly one recorded timestamp | `domain/queue.rs` - `insert()`, `dequeue()`, `remove()` |
//!
//! ## Operations
//!
//! | Method | Effect |
//! |--------|--------|
//! | `enqueue()` | Insert by backward scan from the tail |
//! | `dequeue()` | Pop the front item |
//! | `requeue()` | Remove, then insert with a new timestamp |
//! | `remove()` | Binary search by identity, then splice out |
//! | `list()` | Read-only view of the ordered sequence |
//!
//! ## Identity
//!
//! Items are passed as `Arc<T>`. The allocation is the identity, so two
//! handles with equal contents are different items. The queue records each
//! item's timestamp in an identity-keyed association that never owns the
//! item and is cleared as the item leaves.
//!
//! ## Errors
//!
//! Absence is an `Option` or `bool`. `QueueError::MissingTimestamp` marks a
//! queued item with no recorded timestamp, which only happens if the
//! structure is corrupted.
//!
//! ```rust
//! use ordered_queue::{Keyed, OrderedQueue};
//! use std::sync::Arc;
//!
//! struct Job(String);
//!
//! impl Keyed for Job {
//!     fn key(&self) -> &str {
//!         &self.0
//!     }
//! }
//!
//! let mut queue = OrderedQueue::new();
//! let late = Arc::new(Job("b".into()));
//! let early = Arc::new(Job("a".into()));
//!
//! queue.enqueue(Arc::clone(&late), Some(200))?;
//! queue.enqueue(Arc::clone(&early), Some(100))?;
//! queue.requeue(Arc::clone(&early), Some(300))?;
//!
//! assert!(Arc::ptr_eq(&queue.dequeue().unwrap(), &late));
//! # Ok::<(), ordered_queue::QueueError>(())
//! ```

pub mod config;
pub mod domain;
pub mod ports;

pub use config::QueueConfig;
pub use domain::*;
pub use ports::outbound::{ManualTimeSource, SystemTimeSource, TimeSource};
