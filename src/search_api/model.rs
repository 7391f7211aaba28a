use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Body of the public photo feed.
///
/// Only `items` is kept; the feed's top-level title, link and timestamps are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Items in the order the feed returned them
    pub items: Vec<FeedItem>,
}

/// A single photo of the feed.
///
/// Two items are the same photo when their media URLs match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub media: Media,
    pub description: String,
    pub author: String,
    /// ISO-8601 timestamp, left unparsed
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Media {
    /// URL of the medium-sized image
    pub m: String,
}

impl FeedItem {
    /// Identity of the item, its media URL
    pub fn id(&self) -> &str {
        &self.media.m
    }
}

impl PartialEq for FeedItem {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for FeedItem {}

impl Hash for FeedItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::feed_item;

    #[test]
    fn test_deserialize_feed() {
        let body = r#"{
            "title": "Recent Uploads tagged cat",
            "link": "https://www.flickr.com/photos/tags/cat/",
            "items": [
                {
                    "title": "Cat1",
                    "link": "https://www.flickr.com/photos/someone/1/",
                    "media": {"m": "https://live.staticflickr.com/1_m.jpg"},
                    "date_taken": "2024-06-27T10:00:00-08:00",
                    "description": " <p>A cat</p> ",
                    "published": "2024-06-28T00:00:00Z",
                    "author": "nobody@flickr.com (\"someone\")",
                    "tags": "cat"
                }
            ]
        }"#;

        let response: FeedResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.items.len(), 1);
        let item = &response.items[0];
        assert_eq!(item.title, "Cat1");
        assert_eq!(item.id(), "https://live.staticflickr.com/1_m.jpg");
        assert_eq!(item.published, "2024-06-28T00:00:00Z");
    }

    #[test]
    fn test_missing_field_fails_whole_decode() {
        let body = r#"{"items": [
            {"title": "ok", "link": "l", "media": {"m": "m1"}, "description": "",
             "author": "a", "published": "p"},
            {"title": "no media", "link": "l", "description": "", "author": "a", "published": "p"}
        ]}"#;

        assert!(serde_json::from_str::<FeedResponse>(body).is_err());
    }

    #[test]
    fn test_unexpected_shape_fails() {
        let body = r#"{"items": [
            {"title": 42, "link": "l", "media": {"m": "m1"}, "description": "",
             "author": "a", "published": "p"}
        ]}"#;

        assert!(serde_json::from_str::<FeedResponse>(body).is_err());
    }

    #[test]
    fn test_identity_is_media_url() {
        let a = feed_item("First", "https://example.com/a.jpg");
        let mut b = feed_item("Second", "https://example.com/a.jpg");
        b.author = "someone else".to_string();

        assert_eq!(a, b);
        assert_ne!(a, feed_item("First", "https://example.com/b.jpg"));
    }
}
