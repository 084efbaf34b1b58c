//! Record timestamps
//!
//! All persisted records carry UTC epoch seconds. Time is read through the
//! [`Clock`] trait so services can be driven by a manual clock in tests.

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Current UTC time in epoch seconds
#[inline]
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Timestamp for a rewrite of a record last stamped at `previous`.
///
/// Never returns a value at or below `previous`, even when the wall clock
/// has not advanced a full second since the last write.
#[inline]
pub fn next_modified_at(now: i64, previous: Option<i64>) -> i64 {
    match previous {
        Some(previous) if now <= previous => previous + 1,
        _ => now,
    }
}

/// Source of record timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in UTC epoch seconds
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        now_timestamp()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move forward by `seconds` and return the new time
    pub fn advance(&self, seconds: i64) -> i64 {
        self.now.fetch_add(seconds, Ordering::SeqCst) + seconds
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
