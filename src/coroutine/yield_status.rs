//! This module contains a description of [`YieldStatus`] for low-level work with the scheduler.
//! Please use [`yield_now`](crate::coroutine::yield_now) and [`sleep`](crate::sleep::sleep) if it is possible.
use std::time::Duration;

/// The status of the coroutine yield. This is the one way to communicate with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldStatus {
    /// [`Yield`](YieldStatus::Yield) takes no arguments.
    ///
    /// If yielded, the coroutine let the scheduler wake other coroutines up.
    /// The current coroutine will be woken up by the scheduler after all other ready coroutines.
    Yield,

    /// [`Sleep`](YieldStatus::Sleep) takes the duration.
    ///
    /// # Arguments
    ///
    /// * [`Duration`] - The duration to sleep.
    ///
    /// If yielded, the coroutine will sleep for at least the duration.
    /// A zero duration still suspends: the coroutine goes to the back of the ready queue.
    Sleep(Duration),
}

impl YieldStatus {
    /// Create a YieldStatus variant [`Yield`](YieldStatus::Yield).
    pub fn yield_now() -> Self {
        YieldStatus::Yield
    }

    /// Create a YieldStatus variant [`Sleep`](YieldStatus::Sleep).
    pub fn sleep(duration: Duration) -> Self {
        YieldStatus::Sleep(duration)
    }
}
