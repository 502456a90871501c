//! The fetch-enrich pipeline behind `GET /api/news`.
//!
//! ## Stages
//!
//! 1. **Indexing**: Read up to `max_articles` headlines from the listing page
//! 2. **Enrichment**: Fetch article pages in batches of `concurrency`
//! 3. **Formatting**: Attach source and category to every article
//!
//! Batches run one after another and the requests inside a batch run
//! concurrently, so no more than `concurrency` article requests are ever in
//! flight. A batch only finishes when its slowest request does; a free-running
//! pool bounded by the same limit would finish sooner.

use crate::config::PipelineConfig;
use crate::error::ScrapeError;
use crate::fetcher::PageFetcher;
use crate::models::{EnrichedEntry, FormattedArticle, RawEntry};
use crate::scrapers::ndtv;
use futures::future::join_all;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Enrich `entries` in sequential batches, keeping their order.
///
/// # Arguments
///
/// * `fetcher` - Client used for the article requests
/// * `entries` - Headlines in listing order
/// * `config` - Supplies the batch size and the per-article timeout
///
/// # Returns
///
/// One [`EnrichedEntry`] per input entry, at the same index. Entries whose
/// article could not be read keep an empty image and their listing summary.
#[instrument(level = "info", skip_all, fields(total = entries.len(), batch_size = config.batch_size()))]
pub async fn enrich_in_chunks<F: PageFetcher>(
    fetcher: &F,
    entries: Vec<RawEntry>,
    config: &PipelineConfig,
) -> Vec<EnrichedEntry> {
    let batch_size = config.batch_size();
    let mut enriched = Vec::with_capacity(entries.len());
    let mut pending = entries.into_iter();

    for batch in 0usize.. {
        let chunk: Vec<RawEntry> = pending.by_ref().take(batch_size).collect();
        if chunk.is_empty() {
            break;
        }

        let t0 = Instant::now();
        let size = chunk.len();
        // join_all yields results in input order, not completion order.
        let details = join_all(
            chunk
                .iter()
                .map(|entry| ndtv::enrich(fetcher, entry, config.detail_timeout)),
        )
        .await;

        enriched.extend(
            chunk
                .into_iter()
                .zip(details)
                .map(|(entry, details)| EnrichedEntry::merge(entry, details)),
        );
        debug!(
            batch,
            size,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Enrichment batch complete"
        );
    }

    enriched
}

/// Run the whole pipeline and return articles ready to serve.
///
/// # Errors
///
/// Fails only when the listing itself fails; see
/// [`ndtv::index_articles`]. Individual article failures are absorbed.
#[instrument(level = "info", skip_all)]
pub async fn scrape_news<F: PageFetcher>(
    fetcher: &F,
    config: &PipelineConfig,
) -> Result<Vec<FormattedArticle>, ScrapeError> {
    let entries = ndtv::index_articles(fetcher, config).await?;
    let enriched = enrich_in_chunks(fetcher, entries, config).await;

    let with_image = enriched.iter().filter(|e| !e.image.is_empty()).count();
    info!(count = enriched.len(), with_image, "Scraped NDTV articles");

    Ok(enriched.into_iter().map(FormattedArticle::from).collect())
}
