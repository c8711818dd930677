//! Seekbar Timer - A countdown timer rendered as a seek bar
//!
//! This is the main entry point for the seekbar-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use seekbar_timer::{
    api::create_router,
    config::{Config, Surface},
    host::run_console,
    services::open_browser,
    state::AppState,
    tasks::{completion_notifier_task, tick_source_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    let filter = format!("seekbar_timer={},tower_http=info", config.log_level());
    if config.logs_to_stderr() {
        // Keep stdout free for the console bar
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting seekbar-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, minutes={}, surface={:?}, edge={:?}",
          config.host, config.port, config.minutes, config.surface, config.edge);

    match config.surface {
        Surface::Web => run_web(config).await,
        Surface::Console => {
            let state = Arc::new(AppState::new(config.minutes, config.host.clone(), config.port)?);
            spawn_background_tasks(&state, config.notify);

            tokio::select! {
                result = run_console(Arc::clone(&state)) => result?,
                _ = shutdown_signal(Arc::clone(&state)) => {
                    info!("Shutdown signal received");
                }
            }

            info!("Console surface closed");
            Ok(())
        }
    }
}

fn spawn_background_tasks(state: &Arc<AppState>, notify: bool) {
    let tick_state = Arc::clone(state);
    tokio::spawn(async move {
        tick_source_task(tick_state).await;
    });

    let notifier_state = Arc::clone(state);
    tokio::spawn(async move {
        completion_notifier_task(notifier_state, notify).await;
    });
}

async fn run_web(config: Config) -> anyhow::Result<()> {
    // Bind first so a port of 0 resolves to the real one
    let listener = TcpListener::bind(config.address()).await?;
    let local_addr = listener.local_addr()?;

    let state = Arc::new(
        AppState::new(config.minutes, config.host.clone(), local_addr.port())?.with_edge(config.edge),
    );
    spawn_background_tasks(&state, config.notify);

    let app = create_router(Arc::clone(&state));

    let url = if local_addr.ip().is_unspecified() {
        format!("http://localhost:{}/", local_addr.port())
    } else {
        format!("http://{}/", local_addr)
    };
    info!("Server running on {}", url);
    info!("Endpoints:");
    info!("  GET  /         - Timer page");
    info!("  GET  /status   - Current timer and render snapshot");
    info!("  GET  /events   - Server-Sent Events stream of state updates");
    info!("  POST /start    - Start the countdown");
    info!("  POST /pause    - Pause the countdown");
    info!("  POST /toggle   - Start or pause");
    info!("  POST /reset    - Reset elapsed time");
    info!("  POST /duration - Set duration {{\"minutes\": n}}");
    info!("  POST /quit     - Stop the server");
    info!("  GET  /health   - Health check");

    if config.open {
        if let Err(e) = open_browser(&url).await {
            warn!("{}", e);
            warn!("Open {} manually", url);
        }
    }

    // Dropping the server on shutdown closes open event streams
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal(Arc::clone(&state)) => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
