//! This module contains a description of [`Coroutine`], [`CoroutineImpl`] and [`CoroutineState`] for working with the scheduler.
//! This module is used for low-level work with the scheduler.
use crate::coroutine::YieldStatus;
use crate::error::RunError;
use crate::scheduler::Context;

/// What a coroutine reports back to the [`Scheduler`](crate::Scheduler) after a single resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoroutineState {
    /// The coroutine reached a suspension point. The [`YieldStatus`] tells the scheduler when to wake it up.
    Yielded(YieldStatus),
    /// The coroutine has finished and will be dropped by the scheduler.
    Complete,
}

/// A unit of work that runs in steps.
///
/// Every call to [`resume`](Coroutine::resume) runs the coroutine from its last suspension point
/// up to the next one. The coroutine keeps its own continuation state (which step comes next),
/// so the scheduler only has to decide *when* to call it again.
///
/// Any code between two suspension points runs without preemption:
/// no other coroutine can progress until `resume` returns.
///
/// Returning an error aborts the whole run.
pub trait Coroutine {
    fn resume(&mut self, ctx: &mut Context<'_>) -> Result<CoroutineState, RunError>;
}

/// The alias for [`Box`]<dyn [`Coroutine`]>.
/// The scheduler works only with this type of the coroutines.
pub type CoroutineImpl = Box<dyn Coroutine>;
