use std::path::PathBuf;
use thiserror::Error;
use crate::scheduler::TaskId;

/// Every failure that aborts a run. There is no per-task isolation:
/// the first error returned by a coroutine stops the [`Scheduler`](crate::Scheduler).
#[derive(Debug, Error)]
pub enum RunError {
    #[error("waiting for {guess_count} earlier guesses of Mr.{name} overflows the clock")]
    DurationOverflow { name: String, guess_count: u32 },

    #[error("task {0} was resumed after it had completed")]
    ResumedAfterCompletion(TaskId),

    #[error("workflow of Mr.{name} (task {id}) failed: {message}")]
    Workflow { id: TaskId, name: String, message: String },

    #[error("invalid customer `{0}`, expected NAME:GUESSES")]
    InvalidCustomer(String),

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("core {0} is not available on this machine")]
    CoreUnavailable(usize),
}
