//! Local clock correction against the exchange server clock.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Local wall clock in milliseconds since the epoch
pub fn local_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Offset between the server clock and the local clock
///
/// Zero until [`ClockOffset::record`] is called, so an unsynced client signs
/// with the plain local time and relies on the receive window alone.
#[derive(Debug, Default)]
pub struct ClockOffset {
    offset_ms: AtomicI64,
}

impl ClockOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_ms(&self) -> i64 {
        self.offset_ms.load(Ordering::Relaxed)
    }

    /// Record a server timestamp observed between `sent_at` and `received_at`.
    ///
    /// The server time is compared to the midpoint of the round trip. Returns
    /// the new offset.
    pub fn record(&self, server_time_ms: i64, sent_at_ms: i64, received_at_ms: i64) -> i64 {
        let midpoint = sent_at_ms + (received_at_ms - sent_at_ms) / 2;
        let offset = server_time_ms - midpoint;
        self.offset_ms.store(offset, Ordering::Relaxed);
        offset
    }

    /// Current time on the server clock, as far as we know it
    pub fn now_ms(&self) -> i64 {
        local_now_ms() + self.offset_ms()
    }
}
