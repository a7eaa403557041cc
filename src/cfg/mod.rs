//! Configuration of a run. Everything has a default that reproduces the pizza demo,
//! and every value can be overridden from a JSON file or from the command line.
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::RunError;
use crate::workflow::Customer;

/// How suspension points are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// A suspended task gives the thread to other ready tasks.
    #[default]
    Cooperative,
    /// A suspended task holds the thread until its wait is over, so tasks run one after another.
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// Real time: a run takes as long as its timeline says.
    #[default]
    System,
    /// Virtual time: a run finishes immediately with the same timeline.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerCfg {
    #[serde(rename = "choosing_period_ms", with = "crate::utils::millis")]
    choosing_period: Duration,
    #[serde(rename = "cook_duration_ms", with = "crate::utils::millis")]
    cook_duration: Duration,
    /// Falls back to `choosing_period` when unset.
    #[serde(rename = "order_duration_ms", with = "crate::utils::millis::option")]
    order_duration: Option<Duration>,
    mode: SchedulingMode,
    clock: ClockKind,
    core: Option<usize>,
    customers: Vec<Customer>,
}

impl RunnerCfg {
    pub const DEFAULT_CHOOSING_PERIOD: Duration = Duration::from_secs(3);
    pub const DEFAULT_COOK_DURATION: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self {
            choosing_period: Self::DEFAULT_CHOOSING_PERIOD,
            cook_duration: Self::DEFAULT_COOK_DURATION,
            order_duration: None,
            mode: SchedulingMode::Cooperative,
            clock: ClockKind::System,
            core: None,
            customers: vec![
                Customer::new("HungPT", 0),
                Customer::new("DieuNH", 1),
                Customer::new("GiangND", 2),
                Customer::new("LapTQ", 3),
            ],
        }
    }

    /// Reads the configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RunError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RunError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| RunError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn choosing_period(&self) -> Duration {
        self.choosing_period
    }

    pub fn cook_duration(&self) -> Duration {
        self.cook_duration
    }

    /// The length of the blocking step.
    pub fn order_duration(&self) -> Duration {
        self.order_duration.unwrap_or(self.choosing_period)
    }

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    pub fn clock(&self) -> ClockKind {
        self.clock
    }

    pub fn core(&self) -> Option<usize> {
        self.core
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn set_choosing_period(&mut self, choosing_period: Duration) -> &mut Self {
        self.choosing_period = choosing_period;
        self
    }

    pub fn set_cook_duration(&mut self, cook_duration: Duration) -> &mut Self {
        self.cook_duration = cook_duration;
        self
    }

    pub fn set_order_duration(&mut self, order_duration: Duration) -> &mut Self {
        self.order_duration = Some(order_duration);
        self
    }

    pub fn set_mode(&mut self, mode: SchedulingMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn set_clock(&mut self, clock: ClockKind) -> &mut Self {
        self.clock = clock;
        self
    }

    pub fn set_core(&mut self, core: usize) -> &mut Self {
        self.core = Some(core);
        self
    }

    pub fn set_customers(&mut self, customers: Vec<Customer>) -> &mut Self {
        self.customers = customers;
        self
    }
}

impl Default for RunnerCfg {
    fn default() -> Self {
        Self::new()
    }
}
