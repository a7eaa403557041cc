//! Time sources for the [`Scheduler`](crate::Scheduler).
//!
//! The scheduler never reads the wall clock directly. It asks its [`Clock`] what time it is,
//! and it asks the clock to hold the thread when a blocking step runs or when nothing is ready.
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Returns the time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Holds the current thread for `dur`. Nothing else runs meanwhile.
    fn sleep(&self, dur: Duration);

    /// Holds the current thread until [`now`](Clock::now) reaches `deadline`.
    /// Returns immediately if the deadline has already passed.
    fn sleep_until(&self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            self.sleep(deadline - now);
        }
    }
}

/// Real time, measured with [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Virtual time. Sleeping advances the clock instantly, so runs are deterministic and take no real time.
///
/// Clones share the same time, which lets a test keep a handle to the clock it gave to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    now: Rc<Cell<Duration>>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `dur`.
    pub fn advance(&self, dur: Duration) {
        self.now.set(self.now.get().saturating_add(dur));
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, dur: Duration) {
        self.advance(dur);
    }
}
