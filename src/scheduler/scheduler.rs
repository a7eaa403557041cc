use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;
use crossbeam::channel::{Receiver, Sender};
use slab::Slab;
use tracing::{debug, info, trace};
use crate::cfg::SchedulingMode;
use crate::clock::Clock;
use crate::coroutine::{Coroutine, CoroutineImpl, CoroutineState, YieldStatus};
use crate::error::RunError;
use crate::event::{Event, EventLog};
use crate::scheduler::{Context, TaskId};
use crate::sleep::SleepingCoroutine;

struct Task {
    id: TaskId,
    name: String,
    co: CoroutineImpl,
}

/// The scheduler works with coroutines. Specifically, it:
///
/// - saves the coroutines so that they can be woken up later;
///
/// - stores sleeping coroutines and monitors the time until they need to be woken;
///
/// - records every phase transition in its [`EventLog`].
///
/// Everything runs on the calling thread: exactly one coroutine executes at any instant.
pub struct Scheduler<C: Clock> {
    clock: C,
    mode: SchedulingMode,
    tasks: Slab<Task>,
    task_queue: VecDeque<usize>,
    sleeping: BTreeSet<SleepingCoroutine>,
    events: EventLog,
    launched: usize,
    origin: Duration,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, mode: SchedulingMode) -> Self {
        Self {
            clock,
            mode,
            tasks: Slab::with_capacity(8),
            task_queue: VecDeque::with_capacity(8),
            sleeping: BTreeSet::new(),
            events: EventLog::new(),
            launched: 0,
            origin: Duration::ZERO,
        }
    }

    /// Stores the coroutine in the [`Scheduler`]. It starts at the next [`run`](Scheduler::run),
    /// after every coroutine spawned before it.
    pub fn spawn(&mut self, name: impl Into<String>, co: impl Coroutine + 'static) -> TaskId {
        let id = TaskId(self.launched);
        self.launched += 1;

        let name = name.into();
        debug!(task = %id, %name, "spawned");
        let key = self.tasks.insert(Task { id, name, co: Box::new(co) });
        self.task_queue.push_back(key);

        id
    }

    pub fn subscribe(&mut self) -> Receiver<Event> {
        self.events.subscribe()
    }

    pub fn add_subscriber(&mut self, sender: Sender<Event>) {
        self.events.add_subscriber(sender);
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// The number of tasks that have not completed yet.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wakes up the sleeping coroutines, which are ready to run.
    pub(crate) fn awake_coroutines(&mut self) {
        let now = self.clock.now();
        while let Some(sleeping_coroutine) = self.sleeping.first().copied() {
            if now < sleeping_coroutine.execution_time {
                break;
            }

            trace!(task = %sleeping_coroutine.id, "woken up");
            self.sleeping.pop_first();
            self.task_queue.push_back(sleeping_coroutine.key);
        }
    }

    /// Resume the coroutine stored under `key` and process the result.
    pub(crate) fn handle_coroutine_state(&mut self, key: usize) -> Result<(), RunError> {
        let Some(Task { id, name, co }) = self.tasks.get_mut(key) else {
            return Ok(());
        };
        let id = *id;

        let mut ctx = Context::new(id, name.as_str(), &self.clock, &mut self.events, self.origin);
        let res = co.resume(&mut ctx)?;

        match res {
            CoroutineState::Yielded(YieldStatus::Sleep(dur)) => match self.mode {
                SchedulingMode::Cooperative => {
                    let sleep = SleepingCoroutine::new(self.clock.now(), dur, id, key);
                    trace!(task = %id, ?dur, "sleeping");
                    self.sleeping.insert(sleep);
                }
                SchedulingMode::Sequential => {
                    self.clock.sleep(dur);
                    self.task_queue.push_front(key);
                }
            },

            CoroutineState::Yielded(YieldStatus::Yield) => {
                self.task_queue.push_back(key);
            }

            CoroutineState::Complete => {
                let task = self.tasks.remove(key);
                debug!(task = %task.id, name = %task.name, "completed");
            }
        }

        Ok(())
    }

    /// Runs every spawned coroutine to completion and returns the elapsed time on the scheduler's clock.
    ///
    /// The first error returned by a coroutine stops the run. Events recorded before it stay in the log.
    /// Subscribers' channels are closed in both cases.
    pub fn run(&mut self) -> Result<Duration, RunError> {
        let start = self.clock.now();
        self.origin = start;

        let res = self.run_loop();
        self.events.close();
        res?;

        let elapsed = self.clock.now().saturating_sub(start);
        info!(mode = ?self.mode, elapsed = elapsed.as_secs_f64(), "all tasks completed");

        Ok(elapsed)
    }

    fn run_loop(&mut self) -> Result<(), RunError> {
        loop {
            self.awake_coroutines();

            if let Some(key) = self.task_queue.pop_front() {
                self.handle_coroutine_state(key)?;
                continue;
            }

            match self.sleeping.first() {
                Some(next) => {
                    let deadline = next.execution_time;
                    self.clock.sleep_until(deadline);
                }
                None => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::clock::SimulatedClock;
    use crate::coroutine::{complete, yield_now};
    use crate::event::Phase;
    use crate::sleep::sleep;
    use super::*;

    #[derive(Clone, Copy)]
    enum Action {
        Block(Duration),
        Sleep(Duration),
        Yield,
        Emit(Phase),
        Fail,
    }

    type Trace = Rc<RefCell<Vec<(TaskId, usize, Duration)>>>;

    /// Runs its actions one by one and records when each of them started.
    struct Scripted {
        actions: Vec<Action>,
        next: usize,
        trace: Trace,
    }

    impl Scripted {
        fn new(actions: Vec<Action>, trace: &Trace) -> Self {
            Self { actions, next: 0, trace: trace.clone() }
        }
    }

    impl Coroutine for Scripted {
        fn resume(&mut self, ctx: &mut Context<'_>) -> Result<CoroutineState, RunError> {
            while let Some(action) = self.actions.get(self.next).copied() {
                self.trace.borrow_mut().push((ctx.id(), self.next, ctx.now()));
                self.next += 1;

                match action {
                    Action::Block(dur) => ctx.block_for(dur),
                    Action::Sleep(dur) => return Ok(sleep(dur)),
                    Action::Yield => return Ok(yield_now()),
                    Action::Emit(phase) => ctx.emit(phase),
                    Action::Fail => return Err(ctx.fail("boom")),
                }
            }

            Ok(complete())
        }
    }

    fn secs(secs: u64) -> Duration {
        Duration::from_secs(secs)
    }

    fn scheduler(mode: SchedulingMode) -> (Scheduler<SimulatedClock>, Trace) {
        (Scheduler::new(SimulatedClock::new(), mode), Trace::default())
    }

    #[test]
    fn test_empty_run() {
        let (mut scheduler, _) = scheduler(SchedulingMode::Cooperative);
        assert_eq!(scheduler.run().unwrap(), Duration::ZERO);
        assert!(scheduler.events().is_empty());
    }

    #[test]
    fn test_all_start_before_any_resumes() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        for _ in 0..3 {
            scheduler.spawn("task", Scripted::new(vec![Action::Sleep(Duration::ZERO), Action::Block(secs(1))], &trace));
        }
        scheduler.run().unwrap();

        let steps: Vec<(TaskId, usize)> = trace.borrow().iter().map(|(id, step, _)| (*id, *step)).collect();
        assert_eq!(steps, vec![
            (TaskId(0), 0), (TaskId(1), 0), (TaskId(2), 0),
            (TaskId(0), 1), (TaskId(1), 1), (TaskId(2), 1),
        ]);
    }

    #[test]
    fn test_ties_resume_in_launch_order() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        // all three wake up at 5s
        scheduler.spawn("a", Scripted::new(vec![Action::Sleep(secs(5)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("b", Scripted::new(vec![Action::Sleep(secs(5)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("c", Scripted::new(vec![Action::Sleep(secs(5)), Action::Emit(Phase::Ready)], &trace));
        scheduler.run().unwrap();

        let order: Vec<&str> = scheduler.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(scheduler.events().iter().all(|e| e.at == secs(5)));
    }

    #[test]
    fn test_earlier_deadline_resumes_first() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        scheduler.spawn("late", Scripted::new(vec![Action::Sleep(secs(4)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("early", Scripted::new(vec![Action::Sleep(secs(2)), Action::Emit(Phase::Ready)], &trace));
        let elapsed = scheduler.run().unwrap();

        let order: Vec<(&str, Duration)> = scheduler.events().iter().map(|e| (e.name.as_str(), e.at)).collect();
        assert_eq!(order, vec![("early", secs(2)), ("late", secs(4))]);
        assert_eq!(elapsed, secs(4));
    }

    #[test]
    fn test_blocking_step_delays_ready_tasks() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        scheduler.spawn("sleeper", Scripted::new(vec![Action::Sleep(secs(1)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("blocker", Scripted::new(vec![Action::Block(secs(3)), Action::Emit(Phase::Cooking)], &trace));
        scheduler.run().unwrap();

        // the sleeper was due at 1s but the thread was held until 3s
        let ready = scheduler.events().iter().find(|e| e.name == "sleeper").unwrap();
        assert_eq!(ready.at, secs(3));
        assert_eq!(scheduler.events()[0].name, "blocker");
    }

    #[test]
    fn test_yield_goes_behind_ready_tasks() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        scheduler.spawn("a", Scripted::new(vec![Action::Yield, Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("b", Scripted::new(vec![Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("c", Scripted::new(vec![Action::Emit(Phase::Ready)], &trace));
        scheduler.run().unwrap();

        let order: Vec<&str> = scheduler.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sequential_mode_runs_one_after_another() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Sequential);
        scheduler.spawn("a", Scripted::new(vec![Action::Sleep(secs(2)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("b", Scripted::new(vec![Action::Sleep(secs(2)), Action::Emit(Phase::Ready)], &trace));
        let elapsed = scheduler.run().unwrap();

        let order: Vec<(&str, Duration)> = scheduler.events().iter().map(|e| (e.name.as_str(), e.at)).collect();
        assert_eq!(order, vec![("a", secs(2)), ("b", secs(4))]);
        assert_eq!(elapsed, secs(4));
    }

    #[test]
    fn test_error_aborts_the_run() {
        let (mut scheduler, trace) = scheduler(SchedulingMode::Cooperative);
        let receiver = scheduler.subscribe();
        scheduler.spawn("ok", Scripted::new(vec![Action::Emit(Phase::Ordering), Action::Sleep(secs(5)), Action::Emit(Phase::Ready)], &trace));
        scheduler.spawn("bad", Scripted::new(vec![Action::Sleep(secs(1)), Action::Fail], &trace));

        let err = scheduler.run().unwrap_err();
        assert!(matches!(err, RunError::Workflow { id: TaskId(1), ref message, .. } if message == "boom"));

        // the healthy task never finished, and what was recorded before the failure is kept
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.events().len(), 1);
        assert_eq!(scheduler.events()[0].phase, Phase::Ordering);

        let received: Vec<Event> = receiver.iter().collect();
        assert_eq!(received.len(), 1);
    }

    #[test]
    fn test_elapsed_is_measured_from_run_start() {
        let clock = SimulatedClock::new();
        clock.advance(secs(100));
        let mut scheduler = Scheduler::new(clock, SchedulingMode::Cooperative);
        let trace = Trace::default();
        scheduler.spawn("a", Scripted::new(vec![Action::Sleep(secs(2)), Action::Emit(Phase::Ready)], &trace));

        assert_eq!(scheduler.run().unwrap(), secs(2));
        assert_eq!(scheduler.events()[0].at, secs(2));
        assert_eq!(scheduler.clock().now(), secs(102));
    }
}
