//! Countdown timer engine.
//!
//! The engine is a tick-driven state machine with no internal thread. The host
//! is responsible for calling `tick()` once per second while the timer is
//! running, and for stopping once a command reports that it is no longer
//! running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start()--> Running --stop()--> Idle
//! Running --tick() [reaches total]--> Completed
//! any --reset() | set_duration()--> Idle
//! ```
//!
//! Commands that are documented no-ops in the current state return `None`
//! rather than an error, so callers never have to pre-check the state.

use serde::{Deserialize, Serialize};

use super::error::{Result, TimerError};

/// Duration a freshly created engine counts down from (5 minutes).
pub const DEFAULT_TOTAL_SECONDS: u64 = 300;

/// Message surfaced to the user when the countdown reaches zero.
pub const COMPLETION_MESSAGE: &str = "Time's up!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Not counting. Covers both a fresh timer and a paused one with progress.
    Idle,
    Running,
    Completed,
}

/// Read-only copy of the engine state at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub total_seconds: u64,
    pub current_seconds: u64,
    pub status: TimerStatus,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Idle with some elapsed time, i.e. paused mid-countdown.
    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Idle && self.current_seconds > 0
    }
}

/// Observable result of an engine command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { current_seconds: u64 },
    Paused { current_seconds: u64 },
    Reset,
    DurationChanged { total_seconds: u64 },
    Ticked { current_seconds: u64 },
    /// Completion signal: the countdown reached its configured total.
    Completed { total_seconds: u64 },
}

impl TimerEvent {
    /// Short event name, used as the SSE event type and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TimerEvent::Started { .. } => "started",
            TimerEvent::Paused { .. } => "paused",
            TimerEvent::Reset => "reset",
            TimerEvent::DurationChanged { .. } => "duration_changed",
            TimerEvent::Ticked { .. } => "ticked",
            TimerEvent::Completed { .. } => "completed",
        }
    }
}

/// Core countdown engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    total_seconds: u64,
    current_seconds: u64,
    status: TimerStatus,
}

impl TimerEngine {
    /// Create an idle engine with the default 5 minute duration.
    pub fn new() -> Self {
        Self {
            total_seconds: DEFAULT_TOTAL_SECONDS,
            current_seconds: 0,
            status: TimerStatus::Idle,
        }
    }

    /// Create an idle engine counting down from `minutes`.
    pub fn with_minutes(minutes: i64) -> Result<Self> {
        let mut engine = Self::new();
        engine.set_duration(minutes)?;
        Ok(engine)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn current_seconds(&self) -> u64 {
        self.current_seconds
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            total_seconds: self.total_seconds,
            current_seconds: self.current_seconds,
            status: self.status,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<TimerEvent> {
        match self.status {
            TimerStatus::Idle => {
                self.status = TimerStatus::Running;
                Some(TimerEvent::Started {
                    current_seconds: self.current_seconds,
                })
            }
            // Already counting, or finished and waiting for a reset.
            TimerStatus::Running | TimerStatus::Completed => None,
        }
    }

    pub fn stop(&mut self) -> Option<TimerEvent> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Idle;
                Some(TimerEvent::Paused {
                    current_seconds: self.current_seconds,
                })
            }
            TimerStatus::Idle | TimerStatus::Completed => None,
        }
    }

    /// Stop if running, otherwise start.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        if self.status == TimerStatus::Running {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> TimerEvent {
        self.current_seconds = 0;
        self.status = TimerStatus::Idle;
        TimerEvent::Reset
    }

    /// Set a new duration and reset. Invalid input leaves the engine untouched.
    pub fn set_duration(&mut self, minutes: i64) -> Result<TimerEvent> {
        let total_seconds = u64::try_from(minutes)
            .ok()
            .filter(|&m| m > 0)
            .and_then(|m| m.checked_mul(60))
            .ok_or(TimerError::InvalidDuration(minutes))?;

        self.total_seconds = total_seconds;
        self.reset();
        Ok(TimerEvent::DurationChanged { total_seconds })
    }

    /// Advance one second. Returns `Completed` exactly once, on the tick that
    /// reaches the total.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }

        self.current_seconds += 1;
        if self.current_seconds >= self.total_seconds {
            self.current_seconds = self.total_seconds;
            self.status = TimerStatus::Completed;
            return Some(TimerEvent::Completed {
                total_seconds: self.total_seconds,
            });
        }

        Some(TimerEvent::Ticked {
            current_seconds: self.current_seconds,
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
