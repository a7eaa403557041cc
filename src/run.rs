use std::time::Duration;
use crossbeam::channel::Sender;
use serde::Serialize;
use tracing::info;
use crate::cfg::{ClockKind, RunnerCfg, SchedulingMode};
use crate::clock::{Clock, SimulatedClock, SystemClock};
use crate::error::RunError;
use crate::event::Event;
use crate::scheduler::Scheduler;
use crate::utils::pin_current_thread;
use crate::workflow::PizzaOrder;

/// The outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// `end - start` on the run's clock.
    #[serde(rename = "elapsed_ms", with = "crate::utils::millis")]
    pub elapsed: Duration,
    /// The sum of every order's critical path: what the run would take if nothing overlapped.
    #[serde(rename = "sequential_estimate_ms", with = "crate::utils::millis")]
    pub sequential_estimate: Duration,
    pub mode: SchedulingMode,
    pub events: Vec<Event>,
}

/// Runs the configured customers with the clock chosen in `cfg`.
/// If `cfg` names a core, the current thread is pinned to it first.
///
/// Every event is also sent to `events` as it happens, if given.
/// This function will block the current thread until all orders are served.
///
/// # Examples
///
/// ```
/// use cooprun::cfg::{ClockKind, RunnerCfg};
///
/// let mut cfg = RunnerCfg::new();
/// cfg.set_clock(ClockKind::Simulated);
///
/// let report = cooprun::run(&cfg, None).unwrap();
/// assert_eq!(report.elapsed.as_secs(), 22);
/// ```
pub fn run(cfg: &RunnerCfg, events: Option<Sender<Event>>) -> Result<RunReport, RunError> {
    if let Some(core) = cfg.core() {
        run_on_core(cfg, core, events)
    } else {
        run_with_configured_clock(cfg, events)
    }
}

/// Pins the current thread to `core` and runs there.
pub fn run_on_core(cfg: &RunnerCfg, core: usize, events: Option<Sender<Event>>) -> Result<RunReport, RunError> {
    let core_id = pin_current_thread(core)?;
    info!(core = core_id.id, "pinned to core");
    run_with_configured_clock(cfg, events)
}

fn run_with_configured_clock(cfg: &RunnerCfg, events: Option<Sender<Event>>) -> Result<RunReport, RunError> {
    match cfg.clock() {
        ClockKind::System => run_with_clock(cfg, SystemClock::new(), events),
        ClockKind::Simulated => run_with_clock(cfg, SimulatedClock::new(), events),
    }
}

/// Spawns one [`PizzaOrder`] per customer, in the configured order, and runs them on `clock`.
pub fn run_with_clock<C: Clock>(cfg: &RunnerCfg, clock: C, events: Option<Sender<Event>>) -> Result<RunReport, RunError> {
    let mut scheduler = Scheduler::new(clock, cfg.mode());
    if let Some(sender) = events {
        scheduler.add_subscriber(sender);
    }

    let mut sequential_estimate = Duration::ZERO;
    for customer in cfg.customers() {
        let order = PizzaOrder::new(customer.clone(), cfg);
        sequential_estimate = sequential_estimate.saturating_add(order.critical_path()?);
        scheduler.spawn(customer.name.clone(), order);
    }

    let elapsed = scheduler.run()?;

    Ok(RunReport {
        elapsed,
        sequential_estimate,
        mode: cfg.mode(),
        events: scheduler.take_events(),
    })
}
