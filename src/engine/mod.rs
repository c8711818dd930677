//! Countdown engine module
//!
//! This module contains the timer state machine and the pure render
//! projection shared by every host surface.

pub mod error;
pub mod input;
pub mod timer_engine;
pub mod view;

// Re-export main types
pub use error::TimerError;
pub use input::parse_minutes;
pub use timer_engine::{
    TimerEngine, TimerEvent, TimerSnapshot, TimerStatus, COMPLETION_MESSAGE, DEFAULT_TOTAL_SECONDS,
};
pub use view::{project, ColorBand, RenderSnapshot};
