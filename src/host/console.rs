//! Console host surface
//!
//! Reads one command per line from stdin and redraws a text seek bar on
//! stdout after every state update.

use std::{
    io::{BufRead, Write},
    sync::Arc,
    thread,
};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::{debug, error, info};

use crate::{
    engine::{parse_minutes, RenderSnapshot, TimerError, TimerSnapshot, TimerStatus, COMPLETION_MESSAGE},
    state::AppState,
};
use super::events::{dispatch, Dispatched, HostEvent};

/// Width of the text seek bar in cells
pub const BAR_WIDTH: usize = 30;

pub const HELP: &str =
    "commands: <enter>/t toggle, s start, p pause, r reset, m <minutes> set time, q quit";

/// Parse one console line into a host event
pub fn parse_command(line: &str) -> Result<HostEvent, TimerError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (line, None),
    };

    match (word.to_lowercase().as_str(), rest) {
        ("" | "t" | "toggle", None) => Ok(HostEvent::Toggle),
        ("s" | "start", None) => Ok(HostEvent::Start),
        ("p" | "pause" | "stop", None) => Ok(HostEvent::Pause),
        ("r" | "reset", None) => Ok(HostEvent::Reset),
        ("q" | "quit" | "exit", None) => Ok(HostEvent::Quit),
        ("m" | "set", Some(minutes)) => Ok(HostEvent::SetDuration {
            minutes: parse_minutes(minutes)?,
        }),
        (_, None) => Ok(HostEvent::SetDuration {
            minutes: parse_minutes(word)?,
        }),
        _ => Err(TimerError::InvalidInput(line.to_string())),
    }
}

/// Draw the seek bar line, e.g. `[#####.....] 02:30 mid running`
pub fn render_line(timer: &TimerSnapshot, render: &RenderSnapshot, width: usize) -> String {
    let filled = ((render.progress_fraction * width as f64).round() as usize).min(width);
    let status = match timer.status {
        TimerStatus::Running => "running",
        TimerStatus::Completed => "done",
        TimerStatus::Idle if timer.is_paused() => "paused",
        TimerStatus::Idle => "idle",
    };

    format!(
        "[{}{}] {} {} {}",
        "#".repeat(filled),
        ".".repeat(width - filled),
        render.formatted_time,
        render.color_band.as_str(),
        status
    )
}

fn draw(timer: &TimerSnapshot, render: &RenderSnapshot) {
    let mut stdout = std::io::stdout().lock();
    let drawn = write!(stdout, "\r{}", render_line(timer, render, BAR_WIDTH))
        .and_then(|_| stdout.flush());
    if let Err(e) = drawn {
        debug!("Failed to draw console bar: {}", e);
    }
}

/// Redraw the bar for every update until the channel closes
async fn render_loop(state: Arc<AppState>) {
    let mut rx = state.subscribe();

    loop {
        match rx.recv().await {
            Ok(update) => {
                draw(&update.timer, &update.render);
                if update.is_completion() {
                    println!("\n{}", COMPLETION_MESSAGE);
                }
            }
            Err(RecvError::Lagged(skipped)) => debug!("Console renderer skipped {} updates", skipped),
            Err(RecvError::Closed) => return,
        }
    }
}

/// Forward stdin lines from a dedicated thread
///
/// A blocking read on a runtime thread would keep the runtime from shutting
/// down until the next line arrives. The thread exits on EOF, on a read error,
/// or once the receiver is dropped.
fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);

    thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!("Stopped reading stdin: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Run the console surface until the user quits or stdin closes
pub async fn run_console(state: Arc<AppState>) -> anyhow::Result<()> {
    info!("Starting console surface");
    let lines = spawn_stdin_reader()?;
    drive_console(state, lines).await
}

/// Apply console lines until a quit command or the end of input
async fn drive_console(state: Arc<AppState>, mut lines: mpsc::Receiver<String>) -> anyhow::Result<()> {
    println!("{}", HELP);

    let renderer = tokio::spawn(render_loop(Arc::clone(&state)));

    let timer = state.snapshot()?;
    draw(&timer, &state.render()?);

    while let Some(line) = lines.recv().await {
        let event = match parse_command(&line) {
            Ok(event) => event,
            Err(e) => {
                println!("{}\n{}", e, HELP);
                continue;
            }
        };

        match dispatch(&state, event) {
            Ok(Dispatched::Quit) => break,
            Ok(Dispatched::Command(outcome)) if !outcome.applied() => {
                // Ignored commands produce no update, so redraw here
                draw(&outcome.timer, &outcome.render());
            }
            Ok(Dispatched::Command(_)) => {}
            Err(e) => {
                error!("Console command failed: {}", e);
                println!("{}", e);
            }
        }
    }

    // EOF behaves like quit
    state.request_quit();
    renderer.abort();
    println!();
    Ok(())
}
