//! Signal handling for graceful shutdown

use std::sync::Arc;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

use crate::state::AppState;

/// Wait for shutdown signals (SIGTERM, SIGINT) or a quit request from a host surface
pub async fn shutdown_signal(state: Arc<AppState>) {
    let mut quit_rx = state.quit_requested();
    let quit = async move {
        // The sender lives in `state`, so the channel cannot close first
        let _ = quit_rx.wait_for(|quit| *quit).await;
        info!("Quit requested by host surface");
    };

    let signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to create signal handler, only quit requests will stop the server: {}", e);
            quit.await;
            return;
        }
    };
    let handle = signals.handle();

    let os_signal = async move {
        let mut signals = signals;
        if let Some(signal) = signals.next().await {
            info!("Received signal: {}", signal);
        }
    };

    tokio::select! {
        _ = os_signal => {}
        _ = quit => {}
    }
    handle.close();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn resolves_on_quit_request() {
        let state = Arc::new(AppState::new(1, "127.0.0.1".to_string(), 0).unwrap());
        let waiter = tokio::spawn(shutdown_signal(Arc::clone(&state)));

        state.request_quit();
        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("shutdown did not resolve")
            .unwrap();
    }
}
