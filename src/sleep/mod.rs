use std::time::Duration;
use crate::coroutine::{CoroutineState, YieldStatus};
use crate::scheduler::TaskId;

/// A suspended task waiting for its deadline.
///
/// Ordered by `execution_time` first and launch order second, so among tasks that become ready
/// together, the one spawned first is woken first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SleepingCoroutine {
    pub(crate) execution_time: Duration,
    pub(crate) id: TaskId,
    pub(crate) key: usize,
}

impl SleepingCoroutine {
    pub fn new(now: Duration, dur: Duration, id: TaskId, key: usize) -> Self {
        Self {
            execution_time: now.saturating_add(dur),
            id,
            key,
        }
    }
}

/// Returns [`YieldStatus::Sleep`]. If returned from [`resume`](crate::coroutine::Coroutine::resume),
/// the coroutine is suspended for at least `dur`.
pub fn sleep(dur: Duration) -> CoroutineState {
    CoroutineState::Yielded(YieldStatus::sleep(dur))
}
