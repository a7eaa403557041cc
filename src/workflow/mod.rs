pub mod customer;
pub mod pizza;

pub use customer::*;
pub use pizza::*;
