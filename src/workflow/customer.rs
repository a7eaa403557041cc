use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::RunError;

/// A customer waiting for a pizza. `guess_count` is the number of earlier guesses
/// the cashier has to process before taking this customer's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub guess_count: u32,
}

impl Customer {
    pub fn new(name: impl Into<String>, guess_count: u32) -> Self {
        Self { name: name.into(), guess_count }
    }
}

/// Parses `NAME:GUESSES`.
impl FromStr for Customer {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RunError::InvalidCustomer(s.to_string());

        let (name, guess_count) = s.rsplit_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let guess_count = guess_count.trim().parse().map_err(|_| invalid())?;

        Ok(Self::new(name, guess_count))
    }
}
