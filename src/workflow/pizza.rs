use std::time::Duration;
use crate::cfg::RunnerCfg;
use crate::coroutine::{complete, Coroutine, CoroutineState};
use crate::error::RunError;
use crate::event::Phase;
use crate::scheduler::Context;
use crate::sleep::sleep;
use crate::workflow::Customer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Arrive,
    Order,
    Serve,
    Done,
}

/// One customer's visit to the pizzeria, as a state machine.
///
/// 1. The cashier asks the customer to wait for `guess_count` earlier guesses (suspends).
/// 2. The customer orders. Ordering holds the thread: nobody else is served meanwhile.
/// 3. The pizza is cooked (suspends).
/// 4. The pizza is ready.
#[derive(Debug, Clone)]
pub struct PizzaOrder {
    customer: Customer,
    choosing_period: Duration,
    order_duration: Duration,
    cook_duration: Duration,
    step: Step,
}

impl PizzaOrder {
    pub fn new(customer: Customer, cfg: &RunnerCfg) -> Self {
        Self {
            customer,
            choosing_period: cfg.choosing_period(),
            order_duration: cfg.order_duration(),
            cook_duration: cfg.cook_duration(),
            step: Step::Arrive,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// How long the customer waits for the earlier guesses: `guess_count * choosing_period`.
    pub fn queue_wait(&self) -> Result<Duration, RunError> {
        self.choosing_period
            .checked_mul(self.customer.guess_count)
            .ok_or_else(|| self.overflow())
    }

    /// The time this order takes when nothing else runs: waiting, ordering and cooking.
    pub fn critical_path(&self) -> Result<Duration, RunError> {
        self.queue_wait()?
            .checked_add(self.order_duration)
            .and_then(|dur| dur.checked_add(self.cook_duration))
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> RunError {
        RunError::DurationOverflow {
            name: self.customer.name.clone(),
            guess_count: self.customer.guess_count,
        }
    }
}

impl Coroutine for PizzaOrder {
    fn resume(&mut self, ctx: &mut Context<'_>) -> Result<CoroutineState, RunError> {
        match self.step {
            Step::Arrive => {
                let wait = self.queue_wait()?;
                ctx.emit(Phase::Queued { guess_count: self.customer.guess_count, wait });
                self.step = Step::Order;
                Ok(sleep(wait))
            }

            Step::Order => {
                ctx.emit(Phase::Ordering);
                ctx.block_for(self.order_duration);

                ctx.emit(Phase::Cooking);
                self.step = Step::Serve;
                Ok(sleep(self.cook_duration))
            }

            Step::Serve => {
                ctx.emit(Phase::Ready);
                self.step = Step::Done;
                Ok(complete())
            }

            Step::Done => Err(RunError::ResumedAfterCompletion(ctx.id())),
        }
    }
}
