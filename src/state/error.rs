//! Host-level state errors

use thiserror::Error;

use crate::engine::TimerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to lock timer engine: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    Timer(#[from] TimerError),
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AppError::LockPoisoned(e.to_string())
    }
}
