//! Time sources for the tick scheduler.
//!
//! Component logic runs on the host's wall clock; provider calls get a
//! separately synthesized timestamp that is strictly increasing even when the
//! wall clock stalls or steps backwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

/// Millisecond time source.
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time in Unix milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Externally driven clock, shared between a driver and the engine.
///
/// Replays and tests set the time explicitly before each tick.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Synthesizes strictly increasing provider timestamps.
#[derive(Debug, Clone, Default)]
pub struct MonotonicTimestamp {
    last: Option<u64>,
}

impl MonotonicTimestamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp: `max(now, last + 1)`.
    pub fn next(&mut self, now_ms: u64) -> u64 {
        let timestamp = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(timestamp);
        timestamp
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }
}
