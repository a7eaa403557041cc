use std::fmt;
use serde::Serialize;

/// The launch index of a task: the first spawned task is `TaskId(0)`.
///
/// Ids are never reused, so they also order tasks by launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
