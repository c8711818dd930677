//! Seekbar Timer - A countdown timer rendered as a seek bar
//!
//! This library provides the countdown engine, its render projection, and the
//! host surfaces (a browser page served over HTTP and a console) that drive it.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod host;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{TimerEngine, RenderSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
