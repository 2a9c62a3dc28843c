//! Clock abstraction so decay and scoring can be tested deterministically.

use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current instant, in milliseconds since the Unix epoch.
///
/// Mirrors the teacher workspace's `icn_common::TimeProvider` split between a
/// real wall-clock implementation and a fixed implementation for tests.
pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Reads the OS wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Returns a fixed instant regardless of the wall clock. Test-only.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider(i64);

impl FixedTimeProvider {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
