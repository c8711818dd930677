//! State change notifications and command results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{project, RenderSnapshot, TimerEvent, TimerSnapshot};

/// Broadcast to every host surface after an engine command produced an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUpdate {
    pub event: TimerEvent,
    pub timer: TimerSnapshot,
    pub render: RenderSnapshot,
    pub at: DateTime<Utc>,
}

impl StateUpdate {
    pub fn new(event: TimerEvent, timer: TimerSnapshot) -> Self {
        Self {
            event,
            render: project(&timer),
            timer,
            at: Utc::now(),
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self.event, TimerEvent::Completed { .. })
    }
}

/// Result of routing one command through the engine.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// `None` when the command was a no-op in the current state.
    pub event: Option<TimerEvent>,
    pub timer: TimerSnapshot,
}

impl CommandOutcome {
    pub fn applied(&self) -> bool {
        self.event.is_some()
    }

    pub fn render(&self) -> RenderSnapshot {
        project(&self.timer)
    }
}
