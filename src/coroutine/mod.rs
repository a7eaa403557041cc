pub mod coroutine;
pub mod yield_status;
pub mod yielding;

pub use coroutine::*;
pub use yield_status::*;
pub use yielding::*;
