//! Simulated progress advancement
//!
//! Keeps the bar moving even when the backend offers no progress channel:
//! every tick adds a small random increment, parking just under 95% so the
//! bar never claims completion the request has not reached.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;

use super::Progress;

const TICK_INTERVAL: Duration = Duration::from_millis(300);

/// Simulation stalls here; only a real update or completion passes it
const SIMULATED_CEILING: f64 = 95.0;

pub(super) async fn run(tx: watch::Sender<Progress>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;

        let current = tx.borrow().clone();
        // A real update took over; stop simulating
        if !current.simulated {
            return;
        }

        let step: f64 = rand::rng().random_range(0.0..10.0);
        let next = (current.percent + step).min(SIMULATED_CEILING);
        if tx
            .send(Progress {
                percent: next,
                message: current.message,
                simulated: true,
            })
            .is_err()
        {
            return;
        }
    }
}
