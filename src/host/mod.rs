//! Host surface module
//!
//! This module contains the surface-independent input events and the console
//! surface. The web surface lives in `api`.

pub mod console;
pub mod events;

// Re-export main types
pub use console::run_console;
pub use events::{dispatch, Dispatched, HostEvent};
