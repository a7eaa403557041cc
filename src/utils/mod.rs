pub mod core;
pub mod millis;
pub mod panic;
pub mod time_functions;

pub use self::core::*;
pub use panic::*;
pub use time_functions::*;
