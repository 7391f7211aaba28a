use std::fmt;

use serde::Serialize;

use crate::search_api::model::FeedItem;

/// Fetch lifecycle shown to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    /// Nothing has settled yet
    #[default]
    Idle,
    /// A search is in flight
    Loading,
    /// The latest search failed
    Error,
    /// The latest search succeeded, or the query was cleared
    Loaded,
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UiState::Idle => "idle",
                UiState::Loading => "loading",
                UiState::Error => "error",
                UiState::Loaded => "loaded",
            }
        )
    }
}

/// Snapshot of what the controller publishes.
///
/// `results` is only non-empty while `ui_state` is [`UiState::Loaded`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// The latest edit, settled or not
    pub query_text: String,
    pub ui_state: UiState,
    pub results: Vec<FeedItem>,
}

impl SearchState {
    pub(crate) fn loading(&mut self) {
        self.ui_state = UiState::Loading;
        self.results.clear();
    }

    pub(crate) fn loaded(&mut self, results: Vec<FeedItem>) {
        self.ui_state = UiState::Loaded;
        self.results = results;
    }

    pub(crate) fn failed(&mut self) {
        self.ui_state = UiState::Error;
        self.results.clear();
    }
}
