//! State management module
//!
//! This module contains the shared application state that wraps the timer
//! engine, and the notifications it publishes.

pub mod app_state;
pub mod error;
pub mod update;

// Re-export main types
pub use app_state::AppState;
pub use error::AppError;
pub use update::{CommandOutcome, StateUpdate};
