use std::time::Duration;

use colored::Colorize;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Settings;
use crate::error::SearchError;
use crate::search_api::query::encode_params;

/// Client timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BaseClient {
    base_url: Url,
    client: Client,
}

// This is the base client that will be used to make requests to the feed.
// It wraps a reqwest::Client and encodes query parameters itself so spaces
// are sent as %20.
impl BaseClient {
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url)?;

        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidEndpoint(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .default_headers(Self::default_headers())
            .build()
            .map_err(|err| SearchError::TransportFailure(err.to_string()))?;

        Ok(BaseClient { base_url, client })
    }

    /// Builds a client for the base URL and timeout in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, SearchError> {
        Self::with_timeout(settings.resolved_base_url(), settings.timeout())
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "User-Agent",
            HeaderValue::from_static(concat!("feedsearch/", env!("CARGO_PKG_VERSION"))),
        );

        headers
    }

    /// Resolves `path` against the base URL and attaches the encoded parameters.
    pub fn build_url(
        &self,
        path: &str,
        parameters: Option<&[(String, String)]>,
    ) -> Result<Url, SearchError> {
        let mut url = self.base_url.join(path)?;

        if let Some(parameters) = parameters.filter(|p| !p.is_empty()) {
            url.set_query(Some(&encode_params(parameters)));
        }

        Ok(url)
    }

    pub async fn get(
        &self,
        path: &str,
        parameters: Option<Vec<(String, String)>>,
    ) -> Result<reqwest::Response, SearchError> {
        let url = self.build_url(path, parameters.as_deref())?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SearchError::TransportFailure(format!(
                "{} returned status {}",
                response.url(),
                status
            )));
        }

        Ok(response)
    }
}

// Helper function to evaluate a response
pub async fn evaluate_response<T>(
    response: Result<reqwest::Response, SearchError>,
) -> Result<T, SearchError>
where
    T: for<'de> Deserialize<'de>,
{
    let raw_content = response?
        .text()
        .await
        .map_err(|err| SearchError::TransportFailure(err.to_string()))?;

    serde_json::from_str::<T>(&raw_content).map_err(|err| {
        debug!(body = %raw_content, "response did not match the expected schema");
        SearchError::DecodeFailure(err.to_string())
    })
}

pub(crate) fn print_error(error: String) {
    eprintln!("\n{} {}\n", "Error:".red().bold(), error);
}
