//! View model of a single feed item
//!
//! Turns the raw feed fields into what a detail screen shows: a readable
//! publication date and, when the description mentions one, the image size.

use std::fmt;

use chrono::DateTime;
use lazy_static::lazy_static;
use regress::Regex;
use serde::Serialize;

use crate::search_api::model::FeedItem;

lazy_static! {
    /// Matches sizes written as ` 640 x 480 ` in the description
    static ref IMAGE_SIZE: Regex =
        Regex::new(r"\s(\d+)\sx\s(\d+)\s").expect("Image size pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub title: String,
    pub author: String,
    pub description: String,
    pub link: String,
    pub media_url: String,
    pub published: String,
    pub published_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
}

impl From<&FeedItem> for ItemDetail {
    fn from(item: &FeedItem) -> Self {
        ItemDetail {
            title: item.title.clone(),
            author: item.author.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
            media_url: item.media.m.clone(),
            published: item.published.clone(),
            published_display: format_published(&item.published),
            size: extract_image_size(&item.description),
        }
    }
}

/// Renders an RFC 3339 timestamp as e.g. `Jun 28, 2024, 12:00:00 AM`.
///
/// The wall-clock time of the timestamp's own offset is shown. Input that does
/// not parse is returned unchanged.
pub fn format_published(published: &str) -> String {
    match DateTime::parse_from_rfc3339(published) {
        Ok(date) => date.format("%b %-d, %Y, %-I:%M:%S %p").to_string(),
        Err(_) => published.to_string(),
    }
}

/// Finds the first ` <width> x <height> ` in a description.
pub fn extract_image_size(description: &str) -> Option<ImageSize> {
    let found = IMAGE_SIZE.find(description)?;

    let width = description[found.group(1)?].parse().ok()?;
    let height = description[found.group(2)?].parse().ok()?;

    Some(ImageSize { width, height })
}
