//! Tick source background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{engine::TimerEvent, state::AppState};

/// Cadence at which the running countdown advances
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that drives `AppState::tick` while the timer is armed
///
/// Arming and disarming happen through the state's watch channel, so commands
/// never wait on this task. Every re-arm restarts the cadence, which makes the
/// first tick after a start land one full period later.
pub async fn tick_source_task(state: Arc<AppState>) {
    info!("Starting tick source task");

    let mut armed_rx = state.armed();

    loop {
        // Wait for a start to arm the tick source
        if armed_rx.wait_for(|armed| *armed).await.is_err() {
            debug!("Armed channel closed, stopping tick source");
            return;
        }
        debug!("Tick source armed");

        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(outcome) => {
                            if let Some(TimerEvent::Completed { total_seconds }) = outcome.event {
                                info!("Countdown of {}s completed, tick source disarmed", total_seconds);
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                        }
                    }
                }

                // Pause, reset, new duration or a quick stop/start pair
                changed = armed_rx.changed() => {
                    if changed.is_err() {
                        debug!("Armed channel closed, stopping tick source");
                        return;
                    }
                    debug!("Tick source disarmed");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;
    use crate::engine::TimerStatus;

    fn spawn_state(minutes: i64) -> (Arc<AppState>, tokio::task::JoinHandle<()>) {
        let state = Arc::new(AppState::new(minutes, "127.0.0.1".to_string(), 0).unwrap());
        let handle = tokio::spawn(tick_source_task(Arc::clone(&state)));
        (state, handle)
    }

    fn elapsed(state: &AppState) -> u64 {
        state.snapshot().unwrap().current_seconds
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_only_while_running() {
        let (state, handle) = spawn_state(1);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(elapsed(&state), 0);

        state.start().unwrap();
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(elapsed(&state), 3);

        state.stop().unwrap();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(elapsed(&state), 3);

        state.start().unwrap();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(elapsed(&state), 4);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn completion_disarms_tick_source() {
        let (state, handle) = spawn_state(1);
        let mut updates = state.subscribe();

        state.start().unwrap();
        sleep(Duration::from_secs(65)).await;

        let snap = state.snapshot().unwrap();
        assert_eq!(snap.status, TimerStatus::Completed);
        assert_eq!(snap.current_seconds, 60);
        assert!(!*state.armed().borrow());

        let mut completions = 0;
        while let Ok(update) = updates.try_recv() {
            if update.is_completion() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_running_stops_ticks() {
        let (state, handle) = spawn_state(1);

        state.start().unwrap();
        sleep(Duration::from_millis(2500)).await;
        state.reset().unwrap();
        sleep(Duration::from_secs(3)).await;

        let snap = state.snapshot().unwrap();
        assert_eq!(snap.current_seconds, 0);
        assert_eq!(snap.status, TimerStatus::Idle);

        handle.abort();
    }
}
