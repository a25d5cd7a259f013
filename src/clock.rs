//! Time sources for crawl deadlines and profiling
//!
//! Engines and the profiler never read the system time directly; they go
//! through a [`Clock`] so tests can control elapsed time.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A source of monotonic and wall-clock time
pub trait Clock: Send + Sync {
    /// Current monotonic instant, used for deadlines and durations
    fn instant(&self) -> Instant;

    /// Current wall-clock time, used for report headers
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock
///
/// Clones share the same offset, so a test can hold one handle and advance
/// time while a crawler holds another.
#[derive(Debug, Clone)]
pub struct FakeClock {
    base: Instant,
    base_utc: DateTime<Utc>,
    offset: Arc<Mutex<Duration>>,
}

impl FakeClock {
    /// Creates a clock frozen at the current moment
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            base_utc: Utc::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn instant(&self) -> Instant {
        self.base + self.offset()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        // Offsets beyond chrono's range are not meaningful for a test clock
        let offset = chrono::Duration::from_std(self.offset()).unwrap_or(chrono::Duration::zero());
        self.base_utc + offset
    }
}

/// A fixed instant after which no new page fetch is started
///
/// Computed once at crawl start and shared read-only by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    /// `None` when `now + timeout` does not fit in an `Instant`
    at: Option<Instant>,
}

impl Deadline {
    /// Deadline `timeout` from now according to `clock`
    pub fn after(clock: &dyn Clock, timeout: Duration) -> Self {
        Self {
            at: clock.instant().checked_add(timeout),
        }
    }

    /// Returns true once the clock has reached the deadline
    ///
    /// The deadline instant itself counts as expired, so a zero timeout never
    /// admits any work.
    pub fn has_passed(&self, clock: &dyn Clock) -> bool {
        match self.at {
            Some(at) => clock.instant() >= at,
            None => false,
        }
    }
}
