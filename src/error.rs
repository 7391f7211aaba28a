use thiserror::Error;

/// Failures a feed search can end in.
///
/// The controller collapses every variant into [`crate::controller::UiState::Error`];
/// the kind only shows up in logs and in the one-shot CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The base URL or the joined endpoint path could not be parsed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Connection errors, timeouts and non-2xx statuses
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The body did not match the feed schema
    #[error("Decode failure: {0}")]
    DecodeFailure(String),
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::InvalidEndpoint(err.to_string())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::DecodeFailure(err.to_string())
        } else if err.is_builder() {
            SearchError::InvalidEndpoint(err.to_string())
        } else {
            SearchError::TransportFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::DecodeFailure(err.to_string())
    }
}

/// Errors raised while loading [`crate::config::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the config file as JSON, YAML or TOML: {0}")]
    Parse(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parse_error_is_invalid_endpoint() {
        let err: SearchError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, SearchError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_json_error_is_decode_failure() {
        let err: SearchError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SearchError::DecodeFailure(_)));
    }

    #[test]
    fn test_display_names_the_kind() {
        let err = SearchError::TransportFailure("status 503".to_string());
        assert_eq!(err.to_string(), "Transport failure: status 503");
    }
}
