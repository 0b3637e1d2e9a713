use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    /// Lines that decoded into a message.
    pub decoded: u64,
    /// Lines dropped with a decode error.
    pub rejected: u64,
    /// Handler and replay tasks spawned.
    pub dispatched: u64,
}

#[derive(Debug, Default)]
pub(super) struct Counters {
    decoded: AtomicU64,
    rejected: AtomicU64,
    dispatched: AtomicU64,
}

impl Counters {
    pub(super) fn decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> RouterStats {
        RouterStats {
            decoded: self.decoded.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
        }
    }
}
