//! A Rust client for the public photo feed.
//!
//! This library searches the feed by free text and provides a debounced,
//! cancellable search controller that publishes the fetch state of the latest
//! query, plus the view model used to show a single result.

#![warn(unused_crate_dependencies)]

/// Client functionality for interacting with the feed
pub mod client;

/// Configuration of the client
pub mod config;

/// Detail view model of a feed item
pub mod detail;

/// Error types
pub mod error;

/// Progress spinners
pub(crate) mod progress;

/// Tracing setup
pub mod telemetry;

/// Search API functionality
pub mod search_api {
    pub use model::{FeedItem, FeedResponse, Media};
    pub use query::FeedQuery;
    pub use search::{search, SearchService};

    /// Feed response types
    pub mod model;
    /// Search query building
    pub mod query;
    /// Search execution
    pub mod search;
}

/// Debounced search state machine
pub mod controller {
    pub use debounce::Debouncer;
    pub use search_controller::SearchController;
    pub use state::{SearchState, UiState};

    /// Trailing-edge debouncing of edits
    pub mod debounce;
    /// The controller and its worker task
    pub mod search_controller;
    /// Published state
    pub mod state;
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::client::BaseClient;
    pub use super::config::{Environment, Settings};
    pub use super::controller::{SearchController, SearchState, UiState};
    pub use super::detail::ItemDetail;
    pub use super::error::SearchError;
    pub use super::search_api::{FeedItem, FeedQuery, FeedResponse, SearchService};
}

/// Command-line interface functionality
pub mod cli {
    /// Base CLI functionality
    pub mod base;
    /// Search-as-you-type command
    pub mod interactive;
    /// One-shot search commands
    pub mod search;
}

/// Test utilities
#[cfg(test)]
mod test_utils;
