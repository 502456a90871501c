//! Runtime configuration passed from startup into the server and pipeline.
//!
//! Built once in `main` from the parsed [`Cli`](crate::cli::Cli) and then
//! handed down by value; nothing here is global.

use crate::cli::DEFAULT_LISTING_URL;
use std::time::Duration;

/// Everything the server needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds on `0.0.0.0`.
    pub port: u16,
    /// Browser origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Value of the informational `X-Powered-By` header.
    pub powered_by: String,
    /// Scraping and enrichment settings.
    pub pipeline: PipelineConfig,
}

/// Tunables of the listing scrape and the enrichment batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Listing page holding the headlines.
    pub listing_url: String,
    /// Upper bound on articles returned per request.
    pub max_articles: usize,
    /// Article pages fetched concurrently within one batch.
    pub concurrency: usize,
    /// Timeout of the listing request.
    pub listing_timeout: Duration,
    /// Timeout of each article page request.
    pub detail_timeout: Duration,
    /// Redirects followed before a request fails.
    pub max_redirects: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            max_articles: 10,
            concurrency: 3,
            listing_timeout: Duration::from_secs(10),
            detail_timeout: Duration::from_secs(8),
            max_redirects: 3,
        }
    }
}

impl PipelineConfig {
    /// Batch size actually used; a zero limit would never make progress.
    pub fn batch_size(&self) -> usize {
        self.concurrency.max(1)
    }
}
