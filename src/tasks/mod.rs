//! Background tasks module
//!
//! This module contains background tasks that run alongside the host surface.

pub mod completion_notifier;
pub mod tick_source;

// Re-export main functions
pub use completion_notifier::completion_notifier_task;
pub use tick_source::tick_source_task;
