//! Progress tracking for in-flight generation requests
//!
//! Two sources feed one display: a client-side ticker that advances a
//! simulated percentage, and an optional WebSocket that delivers real
//! progress from the backend. Real updates win; once one arrives the ticker
//! stops advancing. Both are strictly cosmetic: neither can fail or delay
//! the POST they decorate, and both are always stopped before the request
//! settles.

mod ticker;
mod ws;

pub use ws::parse_progress_event;

use std::io::{self, Write};

use colored::Colorize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Current progress display state
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Percentage in [0, 100]
    pub percent: f64,
    /// Optional status line from the backend
    pub message: Option<String>,
    /// Whether the value is client-side simulation
    pub simulated: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            percent: 0.0,
            message: None,
            simulated: true,
        }
    }
}

/// Handle over the spawned progress tasks
pub struct ProgressTracker {
    render: JoinHandle<()>,
    tick: JoinHandle<()>,
    ws: Option<JoinHandle<()>>,
}

impl ProgressTracker {
    /// Start progress display, optionally listening on a WebSocket URL
    pub fn start(ws_url: Option<String>) -> Self {
        let (tx, rx) = watch::channel(Progress::default());

        let render = tokio::spawn(render_loop(rx));
        let tick = tokio::spawn(ticker::run(tx.clone()));
        let ws = ws_url.map(|url| {
            debug!(%url, "start: spawning progress listener");
            tokio::spawn(ws::listen(url, tx))
        });

        Self { render, tick, ws }
    }

    /// Stop all progress tasks and clear the line
    ///
    /// Aborting the listener drops the socket, which closes it; called on
    /// the success and the failure path alike.
    pub fn finish(self) {
        self.tick.abort();
        if let Some(ws) = self.ws {
            ws.abort();
        }
        self.render.abort();
        clear_line();
    }
}

async fn render_loop(mut rx: watch::Receiver<Progress>) {
    loop {
        let progress = rx.borrow_and_update().clone();
        draw(&progress);
        if rx.changed().await.is_err() {
            break;
        }
    }
}

const BAR_WIDTH: usize = 30;

fn draw(progress: &Progress) {
    let filled = ((progress.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let message = progress.message.as_deref().unwrap_or("Planning your trip...");
    print!("\r{} {:>3.0}% {}", bar.cyan(), progress.percent, message.dimmed());
    let _ = io::stdout().flush();
}

fn clear_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracker_finish_aborts_tasks() {
        let tracker = ProgressTracker::start(None);
        // Let the ticker run at least one interval
        tokio::time::sleep(std::time::Duration::from_millis(350)).await;
        tracker.finish();
    }
}
