use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::controller::{SearchController, SearchState};
use crate::error::SearchError;
use crate::search_api::model::{FeedItem, FeedResponse, Media};
use crate::search_api::search::SearchService;

pub(crate) fn feed_item(title: &str, media_url: &str) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: format!("https://www.flickr.com/photos/someone/{}/", title),
        media: Media {
            m: media_url.to_string(),
        },
        description: format!(" <p>{}</p> ", title),
        author: "nobody@flickr.com (\"someone\")".to_string(),
        published: "2024-06-28T00:00:00Z".to_string(),
    }
}

/// A response with one item per title, each with its own media URL
pub(crate) fn feed_response(titles: &[&str]) -> FeedResponse {
    FeedResponse {
        items: titles
            .iter()
            .map(|title| {
                feed_item(
                    title,
                    &format!("https://live.staticflickr.com/{}_m.jpg", title),
                )
            })
            .collect(),
    }
}

/// Search service answering scripted queries after a delay.
///
/// Unscripted queries fail immediately with a transport failure.
#[derive(Default)]
pub(crate) struct MockSearchService {
    scripted: Mutex<HashMap<String, (Duration, Result<FeedResponse, SearchError>)>>,
    calls: Mutex<Vec<String>>,
    completed: AtomicUsize,
}

impl MockSearchService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(
        &self,
        query: &str,
        delay: Duration,
        outcome: Result<FeedResponse, SearchError>,
    ) {
        self.scripted
            .lock()
            .unwrap()
            .insert(query.to_string(), (delay, outcome));
    }

    /// Queries the service was called with, in call order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of scripted calls that ran to the end of their delay
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    async fn search(&self, query: &str) -> Result<FeedResponse, SearchError> {
        self.calls.lock().unwrap().push(query.to_string());
        let scripted = self.scripted.lock().unwrap().get(query).cloned();

        match scripted {
            Some((delay, outcome)) => {
                tokio::time::sleep(delay).await;
                self.completed.fetch_add(1, Ordering::SeqCst);
                outcome
            }
            None => Err(SearchError::TransportFailure(format!(
                "no response scripted for {}",
                query
            ))),
        }
    }
}

/// Waits until the controller publishes a state matching `predicate`.
pub(crate) async fn wait_for_state<F>(controller: &SearchController, predicate: F) -> SearchState
where
    F: FnMut(&SearchState) -> bool,
{
    let mut receiver = controller.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(10), receiver.wait_for(predicate))
        .await
        .expect("Timed out waiting for state")
        .expect("Controller stopped");

    let snapshot = (*state).clone();
    snapshot
}
