//! Completion notification background task

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{
    engine::{view::format_time, COMPLETION_MESSAGE},
    services::send_desktop_notification,
    state::{AppState, StateUpdate},
};

/// Title used for desktop notifications
pub const NOTIFICATION_TITLE: &str = "Timer";

/// Wait for the next completion update, skipping every other update
///
/// Returns `None` once the channel is closed.
pub async fn next_completion(rx: &mut broadcast::Receiver<StateUpdate>) -> Option<StateUpdate> {
    loop {
        match rx.recv().await {
            Ok(update) if update.is_completion() => return Some(update),
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Completion notifier lagged, skipped {} updates", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Background task that surfaces the completion signal to the user
pub async fn completion_notifier_task(state: Arc<AppState>, desktop: bool) {
    info!("Starting completion notifier task (desktop notifications: {})", desktop);

    let mut rx = state.subscribe();

    while let Some(update) = next_completion(&mut rx).await {
        info!(
            "{} ({} elapsed)",
            COMPLETION_MESSAGE,
            format_time(update.timer.total_seconds)
        );

        if desktop {
            if let Err(e) = send_desktop_notification(NOTIFICATION_TITLE, COMPLETION_MESSAGE).await {
                warn!("Failed to show desktop notification: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_to_completion() {
        let state = AppState::new(1, "127.0.0.1".to_string(), 0).unwrap();
        let mut rx = state.subscribe();

        state.start().unwrap();
        for _ in 0..60 {
            state.tick().unwrap();
        }

        let update = next_completion(&mut rx).await.unwrap();
        assert_eq!(update.timer.current_seconds, 60);
        assert_eq!(update.render.remaining_seconds, 0);
    }

    #[tokio::test]
    async fn returns_none_when_channel_closes() {
        let (tx, mut rx) = broadcast::channel::<StateUpdate>(4);
        drop(tx);
        assert!(next_completion(&mut rx).await.is_none());
    }
}
