//! Timer engine errors

use thiserror::Error;

/// Errors that can occur when configuring the timer engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Invalid duration: {0} minutes (must be a positive number of minutes)")]
    InvalidDuration(i64),

    #[error("Invalid input: '{0}' is not a whole number of minutes")]
    InvalidInput(String),
}

pub type Result<T, E = TimerError> = std::result::Result<T, E>;
