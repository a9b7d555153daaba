//! Time source for the timestamp embedded in stored names.

/// Supplies the current unix time in whole seconds.
pub trait Clock: Clone + Send + Sync + 'static {
    fn unix_timestamp(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at one instant, for deterministic names in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(i64);

impl FixedClock {
    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}
