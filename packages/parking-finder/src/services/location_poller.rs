use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::geolocation::GeolocationProvider;
use crate::models::LocationState;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Polls a geolocation provider at a fixed interval and publishes the latest
/// known position.
///
/// A failed poll keeps the last successful location and records the error
/// next to it. Requests never overlap: each tick waits for the previous
/// request to finish, and ticks missed meanwhile are delayed rather than
/// replayed. Dropping the poller stops it.
pub struct LocationPoller {
    state: watch::Receiver<LocationState>,
    task: JoinHandle<()>,
}

impl LocationPoller {
    pub fn spawn<G: GeolocationProvider>(provider: Arc<G>, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let (tx, rx) = watch::channel(LocationState::default());

        info!("Starting location poller every {:?}", interval);
        let task = tokio::spawn(poll_loop(provider, interval, tx));

        Self { state: rx, task }
    }

    /// Snapshot of the latest state
    pub fn current(&self) -> LocationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.clone()
    }

    /// Stop polling. No state updates are published afterwards.
    pub fn stop(&self) {
        if !self.task.is_finished() {
            info!("Stopping location poller");
        }
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LocationPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop<G: GeolocationProvider>(
    provider: Arc<G>,
    interval: Duration,
    tx: watch::Sender<LocationState>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately
        ticker.tick().await;
        poll_once(provider.as_ref(), &tx).await;
    }
}

async fn poll_once<G: GeolocationProvider>(provider: &G, tx: &watch::Sender<LocationState>) {
    tx.send_modify(|state| state.is_loading = true);

    let result = provider.locate().await;

    tx.send_modify(|state| {
        state.is_loading = false;
        match result {
            Ok(location) => {
                debug!("Location updated: {}", location.location);
                state.location = Some(location);
                state.error = None;
            }
            Err(e) => {
                // Keep the last known good location
                warn!("Location poll failed: {}", e);
                state.error = Some(e.to_string());
            }
        }
    });
}
