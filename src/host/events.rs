//! Input events delivered by host surfaces

use serde::{Deserialize, Serialize};

use crate::state::{AppError, AppState, CommandOutcome};

/// A discrete user input, independent of the surface that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Start,
    Pause,
    Reset,
    SetDuration { minutes: i64 },
    Toggle,
    /// Terminates the host, not an engine operation
    Quit,
}

/// What the host should do after dispatching an event
#[derive(Debug, Clone)]
pub enum Dispatched {
    /// Re-render from the outcome
    Command(CommandOutcome),
    /// Shut the host down
    Quit,
}

/// Route a host event to the matching engine operation
pub fn dispatch(state: &AppState, event: HostEvent) -> Result<Dispatched, AppError> {
    let outcome = match event {
        HostEvent::Start => state.start()?,
        HostEvent::Pause => state.stop()?,
        HostEvent::Reset => state.reset()?,
        HostEvent::SetDuration { minutes } => state.set_duration(minutes)?,
        HostEvent::Toggle => state.toggle()?,
        HostEvent::Quit => {
            state.request_quit();
            return Ok(Dispatched::Quit);
        }
    };
    Ok(Dispatched::Command(outcome))
}
