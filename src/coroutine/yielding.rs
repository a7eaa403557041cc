//! This module contains functions for the high-level working with the scheduler. For example, [`yield_now`].
use crate::coroutine::{CoroutineState, YieldStatus};

/// Returns [`YieldStatus::Yield`]. If returned from [`resume`](crate::coroutine::Coroutine::resume),
/// the [`scheduler`](crate::Scheduler) will wake the coroutine up later.
///
/// # Example
///
/// ```
/// use cooprun::coroutine::{yield_now, CoroutineState};
/// use cooprun::{Context, RunError};
///
/// fn step(_ctx: &mut Context<'_>) -> Result<CoroutineState, RunError> {
///     // work here
///     Ok(yield_now()) // let the scheduler wake other coroutines up.
/// }
/// ```
pub fn yield_now() -> CoroutineState {
    CoroutineState::Yielded(YieldStatus::yield_now())
}

/// Returns [`CoroutineState::Complete`].
pub fn complete() -> CoroutineState {
    CoroutineState::Complete
}
