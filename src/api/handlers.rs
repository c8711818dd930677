//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Json, Response,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    engine::project,
    host::{dispatch, Dispatched, HostEvent},
    state::{AppError, AppState},
};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/timer.html"));

/// Dispatch a host event and shape the HTTP response
fn command_response(state: &AppState, event: HostEvent, applied_message: &str) -> Response {
    match dispatch(state, event) {
        Ok(Dispatched::Command(outcome)) => {
            if outcome.applied() {
                Json(ApiResponse::applied(applied_message.to_string(), outcome.timer)).into_response()
            } else {
                let message = format!(
                    "{:?} ignored while timer is {:?}",
                    event, outcome.timer.status
                );
                debug!("{}", message);
                Json(ApiResponse::ignored(message, outcome.timer)).into_response()
            }
        }
        Ok(Dispatched::Quit) => match state.snapshot() {
            Ok(timer) => Json(ApiResponse::applied(applied_message.to_string(), timer)).into_response(),
            Err(e) => {
                error!("Failed to read timer state: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Err(AppError::Timer(e)) => {
            warn!("Rejected {:?}: {}", event, e);
            match state.snapshot() {
                Ok(timer) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::error(e.to_string(), timer)),
                )
                    .into_response(),
                Err(e) => {
                    error!("Failed to read timer state: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
        Err(e) => {
            error!("Failed to apply {:?}: {}", event, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle GET / - Serve the timer page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Response {
    command_response(&state, HostEvent::Start, "Timer started")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Response {
    command_response(&state, HostEvent::Pause, "Timer paused")
}

/// Handle POST /toggle - Start if paused, pause if running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Response {
    command_response(&state, HostEvent::Toggle, "Timer toggled")
}

/// Handle POST /reset - Reset elapsed time to zero
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    command_response(&state, HostEvent::Reset, "Timer reset")
}

/// Handle POST /duration - Set a new duration in minutes
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Response {
    command_response(
        &state,
        HostEvent::SetDuration { minutes: request.minutes },
        &format!("Timer set to {} minutes", request.minutes),
    )
}

/// Handle POST /quit - Shut the server down
pub async fn quit_handler(State(state): State<Arc<AppState>>) -> Response {
    info!("Quit endpoint called");
    command_response(&state, HostEvent::Quit, "Shutting down")
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        render: project(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        edge: state.edge,
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream state updates as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Event stream subscriber connected");

    let updates = stream::unfold(state.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(update) => match Event::default().event(update.event.kind()).json_data(&update) {
                    Ok(event) => return Some((Ok::<_, Infallible>(event), rx)),
                    Err(e) => warn!("Failed to encode state update: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Event stream lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
