//! External service module
//!
//! This module contains functions that reach outside the process: opening the
//! timer page in a browser and showing desktop notifications.

pub mod system;

// Re-export main functions
pub use system::*;
