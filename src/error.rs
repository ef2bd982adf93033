//! Input validation errors.
//!
//! The engine never panics on bad input. Anything it cannot interpret is
//! surfaced to the caller as an `InvalidInputError` and rendered by the
//! route layer as an error fragment.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("roll power must be a finite number (got {0})")]
    NonFinitePower(f64),
    #[error("could not read a number from {0:?}")]
    MalformedNumber(String),
    #[error("gesture mode needs a roll power")]
    MissingPower,
    #[error("unknown power source {0:?} (expected \"gesture\" or \"simple\")")]
    UnknownPowerSource(String),
    #[error("there is no player {0}")]
    InvalidPlayer(u8),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("{0:?} is not a usable element id")]
    InvalidElementId(String),
}
