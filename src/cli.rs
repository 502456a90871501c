//! Command-line interface definitions for the Trending News API.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables,
//! which is how the port is usually handed over by the hosting platform.

use crate::config::{AppConfig, PipelineConfig};
use clap::Parser;
use std::time::Duration;

/// Listing page scraped for headlines when none is configured.
pub const DEFAULT_LISTING_URL: &str = "https://www.ndtv.com/india?pfrom=home-ndtv_mainnavigation";

/// Command-line arguments for the Trending News API server.
///
/// # Examples
///
/// ```sh
/// # Listen on the default port 4000
/// trending_news_api
///
/// # Platform-provided port, smaller batches
/// PORT=8080 trending_news_api --concurrency 2
///
/// # Custom CORS allow-list
/// trending_news_api --cors-origins https://example.com,http://localhost:3000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Listing page to scrape headlines from
    #[arg(long, env = "NEWS_LISTING_URL", default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Maximum number of articles returned per request
    #[arg(long, env = "MAX_ARTICLES", default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_articles: u16,

    /// Number of article pages fetched concurrently per batch
    #[arg(short, long, env = "DETAIL_CONCURRENCY", default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Timeout for the listing page request, in seconds
    #[arg(long, env = "LISTING_TIMEOUT_SECS", default_value_t = 10)]
    pub listing_timeout_secs: u64,

    /// Timeout for each article page request, in seconds
    #[arg(long, env = "DETAIL_TIMEOUT_SECS", default_value_t = 8)]
    pub detail_timeout_secs: u64,

    /// Maximum number of redirects followed per request
    #[arg(long, env = "MAX_REDIRECTS", default_value_t = 3)]
    pub max_redirects: usize,

    /// Origins allowed to call the API from a browser (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "https://voxveritas-backend.vercel.app,https://voxveritas.vercel.app,https://voxveritas.me,https://www.voxveritas.me,http://localhost:3000,http://localhost:4000"
    )]
    pub cors_origins: Vec<String>,

    /// Value of the X-Powered-By response header
    #[arg(long, env = "POWERED_BY", default_value = "Vercel")]
    pub powered_by: String,
}

impl Cli {
    /// Turn parsed arguments into the configuration value handed to the server.
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            port: self.port,
            cors_origins: self
                .cors_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            powered_by: self.powered_by,
            pipeline: PipelineConfig {
                listing_url: self.listing_url,
                max_articles: usize::from(self.max_articles),
                concurrency: usize::from(self.concurrency),
                listing_timeout: Duration::from_secs(self.listing_timeout_secs),
                detail_timeout: Duration::from_secs(self.detail_timeout_secs),
                max_redirects: self.max_redirects,
            },
        }
    }
}
