use structopt::StructOpt;
use url::form_urlencoded;

/// Path of the public photo feed, relative to the base URL
pub const FEED_PATH: &str = "services/feeds/photos_public.gne";

/// A search against the public photo feed.
///
/// The feed filters by tags, so the free text is sent as the `tags` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, StructOpt)]
#[structopt(about = "Search the public photo feed")]
pub struct FeedQuery {
    /// The search text
    #[structopt(help = "The search text")]
    pub text: String,
}

impl FeedQuery {
    pub fn new(text: impl Into<String>) -> Self {
        FeedQuery { text: text.into() }
    }

    /// Converts the query into the feed's query parameters.
    ///
    /// The order is stable so the resulting URL is too.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        vec![
            ("format".to_string(), "json".to_string()),
            ("nojsoncallback".to_string(), "1".to_string()),
            ("tags".to_string(), self.text.clone()),
        ]
    }
}

impl From<&FeedQuery> for Vec<(String, String)> {
    fn from(query: &FeedQuery) -> Self {
        query.to_query_params()
    }
}

/// Percent-encodes a single query component.
///
/// Spaces become `%20` rather than `+`, reserved characters such as `&`, `=`, `#`
/// and `+` are escaped so they cannot split or terminate the query.
pub fn encode_component(value: &str) -> String {
    // byte_serialize escapes a literal '+' as %2B, so every '+' left is a space
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Joins parameters into an encoded query string.
pub fn encode_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}
