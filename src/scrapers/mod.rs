//! News source scrapers.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Indexing**: Read headlines, links and teasers from the source's listing page
//! 2. **Enrichment**: Read image and description metadata from each article page
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | NDTV India | [`ndtv`] | HTML scraping | `h2` headlines, Open Graph metadata |
//!
//! # Common Patterns
//!
//! Each scraper module exports:
//! - `index_articles(fetcher, config)`: Returns the listing's headlines, or fails
//!   when the listing is unreachable or empty
//! - `enrich(fetcher, entry, timeout)`: Returns article metadata; never fails,
//!   errors are logged and reported as empty metadata

pub mod ndtv;
