//! # Domain Layer - Ordered Queue
//!
//! ## Components
//!
//! - `entities`: Keyed trait, Timestamp, ItemId
//! - `queue`: OrderedQueue with backward-scan insert and binary-search lookup
//! - `invariants`: Sort order and association completeness checks
//! - `value_objects`: OrderKey, QueueStatus
//! - `errors`: QueueError enumeration

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod queue;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use queue::*;
pub use value_objects::*;
