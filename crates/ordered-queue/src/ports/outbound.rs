//! Outbound (Driven) ports for the ordered queue.

use crate::domain::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Time source used when an operation is called without a timestamp.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven time source.
///
/// Public so hosts can replay or simulate a schedule deterministically: the
/// queue only reads time through `TimeSource`, and this clock moves only when
/// told to.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    time: AtomicU64,
}

impl ManualTimeSource {
    /// Creates a clock stopped at `initial`.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the clock to `time`.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

impl<S: TimeSource + ?Sized> TimeSource for &S {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<S: TimeSource + ?Sized> TimeSource for std::sync::Arc<S> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
