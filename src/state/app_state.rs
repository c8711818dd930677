//! Main application state management

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::{
    config::Edge,
    engine::{project, RenderSnapshot, TimerEngine, TimerError, TimerEvent, TimerSnapshot},
};
use super::{AppError, CommandOutcome, StateUpdate};

/// Main application state that owns the single timer engine
///
/// Every engine command goes through one mutex, so ticks from the background
/// task never interleave with commands from a host surface.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<TimerEngine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Where the page pins its seek bar
    pub edge: Edge,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for state change notifications
    pub update_tx: broadcast::Sender<StateUpdate>,
    /// Whether the tick source should be running
    armed_tx: watch::Sender<bool>,
    /// Set once a host surface asked to quit
    quit_tx: watch::Sender<bool>,
}

impl AppState {
    /// Create a new AppState with an idle timer of `minutes`
    pub fn new(minutes: i64, host: String, port: u16) -> Result<Self, AppError> {
        let engine = TimerEngine::with_minutes(minutes)?;
        let (update_tx, _) = broadcast::channel(100);

        Ok(Self {
            engine: Mutex::new(engine),
            start_time: Instant::now(),
            port,
            host,
            edge: Edge::Bottom,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            update_tx,
            armed_tx: watch::Sender::new(false),
            quit_tx: watch::Sender::new(false),
        })
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    /// Run a command against the engine and publish its result
    ///
    /// The armed flag and the update are published while the engine lock is
    /// held, so subscribers observe them in command order.
    fn apply<F>(&self, action: &str, command: F) -> Result<CommandOutcome, AppError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<Option<TimerEvent>, TimerError>,
    {
        let mut engine = self.engine.lock()?;

        let event = command(&mut *engine)?;
        let timer = engine.snapshot();

        let running = timer.is_running();
        self.armed_tx.send_if_modified(|armed| {
            let changed = *armed != running;
            *armed = running;
            changed
        });

        if let Some(event) = &event {
            if let Err(e) = self.update_tx.send(StateUpdate::new(event.clone(), timer)) {
                debug!("No listeners for state update: {}", e);
            }
        }
        drop(engine); // Release the lock before bookkeeping

        match &event {
            Some(TimerEvent::Ticked { current_seconds }) => {
                debug!("Tick: {}/{}s", current_seconds, timer.total_seconds);
            }
            Some(event) => {
                info!("Timer {}: {}", action, event.kind());
                self.record_action(action);
            }
            None => debug!("Timer {} ignored in state {:?}", action, timer.status),
        }

        Ok(CommandOutcome { event, timer })
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn start(&self) -> Result<CommandOutcome, AppError> {
        self.apply("start", |engine| Ok(engine.start()))
    }

    /// Pause the countdown, keeping elapsed time
    pub fn stop(&self) -> Result<CommandOutcome, AppError> {
        self.apply("pause", |engine| Ok(engine.stop()))
    }

    pub fn toggle(&self) -> Result<CommandOutcome, AppError> {
        self.apply("toggle", |engine| Ok(engine.toggle()))
    }

    pub fn reset(&self) -> Result<CommandOutcome, AppError> {
        self.apply("reset", |engine| Ok(Some(engine.reset())))
    }

    pub fn set_duration(&self, minutes: i64) -> Result<CommandOutcome, AppError> {
        info!("Setting timer duration to {} minutes", minutes);
        self.apply("set-duration", |engine| engine.set_duration(minutes).map(Some))
    }

    /// Advance the countdown by one second (called by the tick source)
    pub fn tick(&self) -> Result<CommandOutcome, AppError> {
        self.apply("tick", |engine| Ok(engine.tick()))
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, AppError> {
        Ok(self.engine.lock()?.snapshot())
    }

    /// Get current render snapshot
    pub fn render(&self) -> Result<RenderSnapshot, AppError> {
        self.snapshot().map(|timer| project(&timer))
    }

    /// Subscribe to state updates
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.update_tx.subscribe()
    }

    /// Watch the tick source armed flag
    pub fn armed(&self) -> watch::Receiver<bool> {
        self.armed_tx.subscribe()
    }

    /// Ask the hosting process to shut down
    pub fn request_quit(&self) {
        info!("Quit requested");
        self.record_action("quit");
        self.quit_tx.send_replace(true);
    }

    /// Watch the quit request flag
    pub fn quit_requested(&self) -> watch::Receiver<bool> {
        self.quit_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;
    use crate::engine::TimerStatus;

    fn state(minutes: i64) -> AppState {
        AppState::new(minutes, "127.0.0.1".to_string(), 0).unwrap()
    }

    #[test]
    fn rejects_invalid_initial_duration() {
        let result = AppState::new(0, "127.0.0.1".to_string(), 0);
        assert!(matches!(
            result,
            Err(AppError::Timer(TimerError::InvalidDuration(0)))
        ));
    }

    #[test]
    fn start_and_stop_toggle_armed_flag() {
        let state = state(1);
        let armed = state.armed();
        assert!(!*armed.borrow());

        assert!(state.start().unwrap().applied());
        assert!(*armed.borrow());

        assert!(state.stop().unwrap().applied());
        assert!(!*armed.borrow());
    }

    #[test]
    fn ignored_commands_report_not_applied() {
        let state = state(1);
        let outcome = state.stop().unwrap();
        assert!(!outcome.applied());
        assert_eq!(outcome.timer.status, TimerStatus::Idle);
        assert_eq!(state.get_last_action().0, None);
    }

    #[test]
    fn completion_disarms_and_broadcasts() {
        let state = state(1);
        let mut updates = state.subscribe();
        let armed = state.armed();

        state.start().unwrap();
        for _ in 0..60 {
            state.tick().unwrap();
        }
        assert!(!*armed.borrow());
        assert_eq!(state.snapshot().unwrap().status, TimerStatus::Completed);

        let mut completions = 0;
        let mut received = 0;
        while let Ok(update) = updates.try_recv() {
            received += 1;
            if update.is_completion() {
                completions += 1;
                assert_eq!(update.render.formatted_time, "00:00");
            }
        }
        // started + 59 ticks + completed
        assert_eq!(received, 61);
        assert_eq!(completions, 1);
    }

    #[test]
    fn invalid_duration_changes_nothing() {
        let state = state(5);
        let mut updates = state.subscribe();
        state.start().unwrap();
        state.tick().unwrap();
        let before = state.snapshot().unwrap();
        while updates.try_recv().is_ok() {}

        let err = state.set_duration(-1).unwrap_err();
        assert!(matches!(err, AppError::Timer(TimerError::InvalidDuration(-1))));
        assert_eq!(state.snapshot().unwrap(), before);
        assert!(*state.armed().borrow());
        assert!(updates.try_recv().is_err());
    }

    #[test]
    fn set_duration_disarms_and_resets() {
        let state = state(5);
        state.start().unwrap();
        state.tick().unwrap();

        let outcome = state.set_duration(10).unwrap();
        assert_eq!(outcome.timer.total_seconds, 600);
        assert_eq!(outcome.timer.current_seconds, 0);
        assert!(!*state.armed().borrow());
        assert_eq!(state.get_last_action().0.as_deref(), Some("set-duration"));
    }

    #[test]
    fn concurrent_ticks_and_commands_keep_invariant() {
        let state = Arc::new(state(1));
        state.start().unwrap();

        let ticker = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..500 {
                    state.tick().unwrap();
                }
            })
        };
        let controller = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for i in 0..200 {
                    match i % 3 {
                        0 => state.toggle().unwrap(),
                        1 => state.stop().unwrap(),
                        _ => state.start().unwrap(),
                    };
                    let snap = state.snapshot().unwrap();
                    assert!(snap.current_seconds <= snap.total_seconds);
                }
            })
        };

        ticker.join().unwrap();
        controller.join().unwrap();

        let snap = state.snapshot().unwrap();
        assert!(snap.current_seconds <= snap.total_seconds);
        assert_eq!(*state.armed().borrow(), snap.is_running());
    }

    #[test]
    fn quit_request_is_observable() {
        let state = state(1);
        let quit = state.quit_requested();
        assert!(!*quit.borrow());
        state.request_quit();
        assert!(*quit.borrow());
    }
}
