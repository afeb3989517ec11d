use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::directions::{DirectionsProvider, RouteError};
use crate::libraries::route_summary;
use crate::models::{Coordinate, LocationState, RouteAlternative, RouteSummary};

#[derive(Debug, Default)]
struct RouteState {
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    alternatives: Vec<RouteAlternative>,
    selected: usize,
    last_error: Option<String>,
}

impl RouteState {
    fn summary(&self) -> Option<RouteSummary> {
        route_summary::summarize(&self.alternatives, self.selected)
    }
}

/// Point-in-time view of the summarizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSnapshot {
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub alternatives: usize,
    pub selected_index: usize,
    pub summary: Option<RouteSummary>,
    pub error: Option<String>,
}

/// Keeps the route alternatives for the latest origin/destination pair and
/// derives the summary of the selected one.
///
/// Every request is tagged with a generation number; a response is applied
/// only if no newer request was issued while it was in flight. Failures keep
/// the previous alternatives and are reported both to the caller and through
/// [`LiveRouteSummarizer::last_error`].
pub struct LiveRouteSummarizer<D> {
    provider: D,
    generation: AtomicU64,
    state: RwLock<RouteState>,
}

impl<D: DirectionsProvider> LiveRouteSummarizer<D> {
    pub fn new(provider: D) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
            state: RwLock::new(RouteState::default()),
        }
    }

    /// Request routes for a new origin/destination pair.
    ///
    /// Returns `Ok(None)` when a newer request was issued while this one was
    /// in flight; its result is discarded and state is left untouched.
    pub async fn update(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Option<RouteSummary>, RouteError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.provider.route(origin, destination).await;

        let mut state = self.state.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            debug!(
                "Dropping stale route response (generation {}, latest {})",
                generation, latest
            );
            return Ok(None);
        }

        match result {
            Ok(alternatives) => {
                debug!(
                    "Received {} route alternative(s) {} -> {}",
                    alternatives.len(),
                    origin,
                    destination
                );
                state.origin = Some(origin);
                state.destination = Some(destination);
                state.alternatives = alternatives;
                state.selected = 0;
                state.last_error = None;
                Ok(state.summary())
            }
            Err(e) => {
                error!("Error fetching directions: {}", e);
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Switch to another alternative of the current route set
    pub async fn select(&self, index: usize) -> Result<Option<RouteSummary>, RouteError> {
        let mut state = self.state.write().await;
        let available = state.alternatives.len();
        if index >= available {
            return Err(RouteError::NoSuchAlternative { index, available });
        }
        state.selected = index;
        Ok(state.summary())
    }

    pub async fn summary(&self) -> Option<RouteSummary> {
        self.state.read().await.summary()
    }

    pub async fn alternatives(&self) -> Vec<RouteAlternative> {
        self.state.read().await.alternatives.clone()
    }

    pub async fn selected_index(&self) -> usize {
        self.state.read().await.selected
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn snapshot(&self) -> RouteSnapshot {
        let state = self.state.read().await;
        RouteSnapshot {
            origin: state.origin,
            destination: state.destination,
            alternatives: state.alternatives.len(),
            selected_index: state.selected,
            summary: state.summary(),
            error: state.last_error.clone(),
        }
    }
}

/// Follows one destination at a time, re-requesting the route whenever the
/// polled origin moves.
pub struct RouteTracker<D> {
    summarizer: Arc<LiveRouteSummarizer<D>>,
    location: watch::Receiver<LocationState>,
    active: Mutex<Option<(Coordinate, JoinHandle<()>)>>,
}

impl<D: DirectionsProvider> RouteTracker<D> {
    pub fn new(
        summarizer: Arc<LiveRouteSummarizer<D>>,
        location: watch::Receiver<LocationState>,
    ) -> Self {
        Self {
            summarizer,
            location,
            active: Mutex::new(None),
        }
    }

    pub fn summarizer(&self) -> &Arc<LiveRouteSummarizer<D>> {
        &self.summarizer
    }

    /// Start following `destination` unless it is already being followed.
    ///
    /// When switching destinations the route is requested right away from
    /// the current origin, so the caller sees the outcome of that request.
    pub async fn follow(&self, destination: Coordinate) -> Result<(), RouteError> {
        let origin = {
            let mut active = self.active.lock().await;

            if let Some((current, task)) = active.as_ref() {
                if *current == destination && !task.is_finished() {
                    return Ok(());
                }
            }
            if let Some((previous, task)) = active.take() {
                debug!("No longer following {}", previous);
                task.abort();
            }

            let origin = self.location.borrow().coordinate();
            info!("Following route to {}", destination);
            let task = tokio::spawn(follow_loop(
                self.summarizer.clone(),
                self.location.clone(),
                destination,
                origin,
            ));
            *active = Some((destination, task));
            origin
        };

        // Lock released: the request may take up to the HTTP timeout
        match origin {
            Some(origin) => self.summarizer.update(origin, destination).await.map(|_| ()),
            None => Ok(()),
        }
    }

    pub async fn following(&self) -> Option<Coordinate> {
        let active = self.active.lock().await;
        active
            .as_ref()
            .filter(|(_, task)| !task.is_finished())
            .map(|(destination, _)| *destination)
    }

    pub async fn stop(&self) {
        if let Some((destination, task)) = self.active.lock().await.take() {
            info!("Stopped following route to {}", destination);
            task.abort();
        }
    }
}

impl<D> Drop for RouteTracker<D> {
    fn drop(&mut self) {
        if let Some((_, task)) = self.active.get_mut().take() {
            task.abort();
        }
    }
}

async fn follow_loop<D: DirectionsProvider>(
    summarizer: Arc<LiveRouteSummarizer<D>>,
    mut location: watch::Receiver<LocationState>,
    destination: Coordinate,
    mut last_origin: Option<Coordinate>,
) {
    loop {
        if location.changed().await.is_err() {
            debug!("Location source closed, route tracking ends");
            break;
        }

        let origin = location.borrow_and_update().coordinate();
        let Some(origin) = origin else {
            continue;
        };
        if last_origin == Some(origin) {
            continue;
        }
        last_origin = Some(origin);

        if let Err(e) = summarizer.update(origin, destination).await {
            warn!("Live route update failed, keeping previous route: {}", e);
        }
    }
}
