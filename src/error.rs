//! Typed errors for page fetching and listing scrapes.
//!
//! Only whole-pipeline failures are modelled here. Failures while enriching a
//! single article are absorbed where they happen and never reach these types'
//! callers.

use thiserror::Error;

/// A single outbound page request failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, redirect or body decoding failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response within the configured timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Upstream answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Classify a `reqwest` error for `url`, keeping timeouts distinct.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// The news pipeline could not produce any articles.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The listing page could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The listing page parsed but no headline survived filtering
    #[error("No articles found - selectors may need updating.")]
    NoArticles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "request to https://example.com returned HTTP 503");
    }

    #[test]
    fn test_scrape_error_wraps_fetch_error() {
        let err: ScrapeError = FetchError::Timeout {
            url: "https://example.com".to_string(),
        }
        .into();
        assert!(matches!(err, ScrapeError::Fetch(FetchError::Timeout { .. })));
        assert_eq!(err.to_string(), "request to https://example.com timed out");
    }

    #[test]
    fn test_no_articles_message() {
        assert_eq!(
            ScrapeError::NoArticles.to_string(),
            "No articles found - selectors may need updating."
        );
    }
}
