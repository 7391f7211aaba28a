use async_trait::async_trait;

use crate::client::{evaluate_response, BaseClient};
use crate::error::SearchError;
use crate::search_api::model::FeedResponse;
use crate::search_api::query::{FeedQuery, FEED_PATH};

/// Performs a search against the public photo feed.
///
/// This asynchronous function sends a GET request to the feed endpoint with the
/// query text as tag filter. Dropping the returned future cancels the request.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `query` - A reference to the `FeedQuery` carrying the search text.
///
/// # Returns
///
/// The items of the feed in the order they were returned, or a `SearchError`
/// describing whether the endpoint, the transport or the body was at fault.
pub async fn search(client: &BaseClient, query: &FeedQuery) -> Result<FeedResponse, SearchError> {
    let params: Vec<(String, String)> = query.into();
    let response = client.get(FEED_PATH, Some(params)).await;

    evaluate_response::<FeedResponse>(response).await
}

/// Something that can answer a search text with a feed.
///
/// The controller only depends on this trait so it can be driven by a mock in tests.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> Result<FeedResponse, SearchError>;
}

#[async_trait]
impl SearchService for BaseClient {
    async fn search(&self, query: &str) -> Result<FeedResponse, SearchError> {
        search(self, &FeedQuery::new(query)).await
    }
}
