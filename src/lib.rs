//! A single-threaded cooperative task runner.
//!
//! Workflows are [`coroutines`](coroutine::Coroutine) written as explicit state machines.
//! They give control back to the [`Scheduler`] at suspension points, and the scheduler
//! interleaves them on one logical thread using an injected [`Clock`](clock::Clock).

pub mod cfg;
pub mod clock;
pub mod coroutine;
pub mod error;
pub mod event;
pub mod run;
pub mod scheduler;
pub mod sleep;
pub mod utils;
pub mod workflow;

pub use error::RunError;
pub use run::*;
pub use scheduler::{Context, Scheduler, TaskId};
