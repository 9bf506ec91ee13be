//! Ports layer for the ordered queue.
//!
//! Outbound (Driven) ports: dependencies the queue needs from its host.

pub mod outbound;

pub use outbound::*;
