pub mod context;
pub mod id;
pub mod scheduler;

pub use context::Context;
pub use id::TaskId;
pub use scheduler::*;
