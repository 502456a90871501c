//! Data models for scraped headlines and the JSON served by the API.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawEntry`]: A headline as found on the listing page
//! - [`ArticleDetails`]: Open Graph metadata read from an article's own page
//! - [`EnrichedEntry`]: A headline merged with its article metadata
//! - [`FormattedArticle`]: The unit returned to API clients
//! - [`NewsResponse`] / [`ErrorResponse`]: The `/api/news` response envelopes
//!
//! The response envelopes use camelCase field names to match the JSON shape
//! clients already consume.

use serde::{Deserialize, Serialize};

/// Publisher name attached to every served article.
pub const SOURCE_NAME: &str = "NDTV";

/// Section name attached to every served article.
pub const CATEGORY: &str = "India";

/// A headline scraped from the listing page.
///
/// `title` and `link` are always non-empty and `link` is an absolute URL;
/// entries that don't satisfy this are never constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Trimmed headline text.
    pub title: String,
    /// Absolute URL of the article page.
    pub link: String,
    /// Teaser paragraph from the listing page, possibly empty.
    pub summary: String,
}

/// Metadata read from an article page's Open Graph tags.
///
/// Both fields are empty when the tag is missing or the page could not be
/// fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDetails {
    pub image: String,
    pub description: String,
}

/// A headline merged with its article metadata.
///
/// The listing summary is not carried over; it only survives as the
/// description fallback applied by [`EnrichedEntry::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEntry {
    pub title: String,
    pub link: String,
    pub image: String,
    /// Open Graph description, or the listing summary when that is empty.
    pub description: String,
}

impl EnrichedEntry {
    /// Merge `details` into `entry`, falling back to the listing summary for
    /// an empty description.
    pub fn merge(entry: RawEntry, details: ArticleDetails) -> Self {
        let description = if details.description.is_empty() {
            entry.summary
        } else {
            details.description
        };
        Self {
            title: entry.title,
            link: entry.link,
            image: details.image,
            description,
        }
    }
}

/// A single article as returned by `GET /api/news`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedArticle {
    pub title: String,
    pub link: String,
    pub image: String,
    pub description: String,
    /// Always [`SOURCE_NAME`].
    pub source: String,
    /// Always [`CATEGORY`].
    pub category: String,
}

impl From<EnrichedEntry> for FormattedArticle {
    fn from(entry: EnrichedEntry) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            image: entry.image,
            description: entry.description,
            source: SOURCE_NAME.to_string(),
            category: CATEGORY.to_string(),
        }
    }
}

/// Successful `GET /api/news` body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub success: bool,
    /// Always `data.len()`.
    pub count: usize,
    pub data: Vec<FormattedArticle>,
    /// ISO-8601 UTC time the response was produced.
    pub timestamp: String,
    /// Wall time of the pipeline, formatted as `"<ms>ms"`.
    pub execution_time: String,
}

/// Failed `GET /api/news` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Short, stable description of what failed.
    pub error: String,
    /// Detailed reason.
    pub message: String,
    pub timestamp: String,
}
