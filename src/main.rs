//! # Trending News API
//!
//! An HTTP service that scrapes the latest NDTV India headlines, enriches each
//! with the image and description from the article's Open Graph tags, and
//! serves the result as JSON.
//!
//! ## Usage
//!
//! ```sh
//! PORT=4000 trending_news_api
//! curl http://localhost:4000/api/news
//! ```
//!
//! ## Architecture
//!
//! Every `GET /api/news` runs the pipeline from scratch:
//! 1. **Indexing**: Read headlines, links and teasers from the listing page
//! 2. **Enrichment**: Fetch article pages in small concurrent batches (3 at a time)
//! 3. **Output**: Return the articles in listing order as JSON

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod fetcher;
mod models;
mod pipeline;
mod scrapers;
mod server;
mod utils;

#[cfg(test)]
mod testing;

use cli::Cli;
use fetcher::HttpFetcher;
use server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = server::API_VERSION, "trending_news_api starting up");

    let config = Cli::parse().into_config();
    debug!(?config, "Parsed configuration");

    let fetcher = HttpFetcher::new(config.pipeline.max_redirects)?;
    let app = build_router(AppState::new(fetcher, &config), &config.cors_origins);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Trending News API is running");
    info!("News endpoint: http://localhost:{}/api/news", config.port);
    info!("API docs: http://localhost:{}/", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
