use std::time::Duration;
use tracing::trace;
use crate::clock::Clock;
use crate::error::RunError;
use crate::event::{EventLog, Phase};
use crate::scheduler::TaskId;

/// What a coroutine can see and do while it is being resumed.
pub struct Context<'a> {
    id: TaskId,
    name: &'a str,
    clock: &'a dyn Clock,
    events: &'a mut EventLog,
    origin: Duration,
}

impl<'a> Context<'a> {
    pub(crate) fn new(id: TaskId, name: &'a str, clock: &'a dyn Clock, events: &'a mut EventLog, origin: Duration) -> Self {
        Self { id, name, clock, events, origin }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Time since the run started.
    pub fn now(&self) -> Duration {
        self.clock.now().saturating_sub(self.origin)
    }

    /// Occupies the thread for `dur` without suspending. No other task progresses meanwhile.
    pub fn block_for(&mut self, dur: Duration) {
        trace!(task = %self.id, ?dur, "blocking step");
        self.clock.sleep(dur);
    }

    /// Records a phase transition of the current task.
    pub fn emit(&mut self, phase: Phase) {
        let at = self.now();
        self.events.record(self.id, self.name, at, phase);
    }

    /// Builds the error a failing workflow step returns.
    pub fn fail(&self, message: impl Into<String>) -> RunError {
        RunError::Workflow {
            id: self.id,
            name: self.name.to_string(),
            message: message.into(),
        }
    }
}
