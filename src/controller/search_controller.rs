use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::controller::debounce::{Debouncer, DEFAULT_WINDOW};
use crate::controller::state::SearchState;
use crate::error::SearchError;
use crate::search_api::model::FeedResponse;
use crate::search_api::search::SearchService;

/// Drives searches from a stream of query edits.
///
/// Edits are debounced, duplicates dropped, and at most one request is in flight at
/// any time. The state is owned by a worker task spawned on the current tokio runtime;
/// the controller only sends it edits and reads what it publishes.
///
/// A request that never resolves keeps the state at `Loading`; only the HTTP client's
/// own timeout bounds it.
pub struct SearchController {
    /// Taken by [`SearchController::close`] to signal the end of input
    edits: Option<mpsc::UnboundedSender<String>>,
    state: watch::Receiver<SearchState>,
    worker: JoinHandle<()>,
}

impl SearchController {
    /// Creates a controller with the default 100 ms debounce window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self::with_debounce(service, DEFAULT_WINDOW)
    }

    pub fn with_debounce(service: Arc<dyn SearchService>, window: Duration) -> Self {
        let (edits_tx, edits_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::default());
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();

        let worker = Worker {
            service,
            debouncer: Debouncer::new(window),
            edits: edits_rx,
            resolutions_tx,
            resolutions: resolutions_rx,
            state: state_tx,
            generation: 0,
            in_flight: None,
        };

        SearchController {
            edits: Some(edits_tx),
            state: state_rx,
            worker: tokio::spawn(worker.run()),
        }
    }

    /// Feeds one edit of the search box.
    pub fn set_query_text(&self, text: impl Into<String>) {
        if let Some(edits) = &self.edits {
            // Only fails once the worker is gone, and then nobody observes the state anymore
            let _ = edits.send(text.into());
        }
    }

    /// Ends the input and waits for the last edit to be searched.
    ///
    /// A pending edit is settled right away instead of after its window, and the
    /// returned state is the outcome of the request it issued, if any.
    pub async fn close(mut self) -> SearchState {
        self.edits.take();
        let _ = (&mut self.worker).await;
        self.state()
    }

    /// Current state snapshot
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Outcome of one issued request, tagged with the generation it was issued under.
struct Resolution {
    generation: u64,
    outcome: Result<FeedResponse, SearchError>,
}

struct Worker {
    service: Arc<dyn SearchService>,
    debouncer: Debouncer<String>,
    edits: mpsc::UnboundedReceiver<String>,
    resolutions_tx: mpsc::UnboundedSender<Resolution>,
    resolutions: mpsc::UnboundedReceiver<Resolution>,
    state: watch::Sender<SearchState>,
    /// Bumped whenever the in-flight request is cancelled or replaced
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl Worker {
    async fn run(mut self) {
        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                edit = self.edits.recv() => match edit {
                    Some(text) => self.on_edit(text),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = self.debouncer.settle(Instant::now()) {
                        self.on_settled(text);
                    }
                }
                Some(resolution) = self.resolutions.recv() => self.on_resolution(resolution),
            }
        }

        self.drain().await;
    }

    /// Settles what is still pending once no more edits can arrive and waits for
    /// the request it issued.
    async fn drain(&mut self) {
        if let Some(text) = self.debouncer.flush() {
            self.on_settled(text);
        }

        while self.in_flight.is_some() {
            match self.resolutions.recv().await {
                Some(resolution) => self.on_resolution(resolution),
                None => break,
            }
        }
    }

    fn on_edit(&mut self, text: String) {
        self.debouncer.push(text.clone(), Instant::now());
        self.state.send_modify(|state| state.query_text = text);
    }

    fn on_settled(&mut self, text: String) {
        debug!(query = %text, "query settled");
        self.cancel_in_flight();

        if text.is_empty() {
            self.state.send_modify(|state| state.loaded(Vec::new()));
            return;
        }

        self.state.send_modify(SearchState::loading);

        let service = Arc::clone(&self.service);
        let resolutions = self.resolutions_tx.clone();
        let generation = self.generation;

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = service.search(&text).await;
            // The worker owns the receiving end, so this only fails during shutdown
            let _ = resolutions.send(Resolution {
                generation,
                outcome,
            });
        }));
    }

    fn on_resolution(&mut self, resolution: Resolution) {
        if resolution.generation != self.generation {
            debug!(
                generation = resolution.generation,
                current = self.generation,
                "discarding superseded response"
            );
            return;
        }

        self.in_flight = None;

        match resolution.outcome {
            Ok(response) => {
                debug!(items = response.items.len(), "search loaded");
                self.state.send_modify(|state| state.loaded(response.items));
            }
            Err(err) => {
                warn!(error = %err, "search failed");
                self.state.send_modify(SearchState::failed);
            }
        }
    }

    /// Aborts the running request and invalidates whatever it may still deliver.
    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!(generation = self.generation, "cancelling in-flight search");
            handle.abort();
        }

        self.generation += 1;
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
