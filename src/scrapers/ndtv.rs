//! NDTV India scraper.
//!
//! This module scrapes headlines from the [NDTV India](https://www.ndtv.com/india)
//! section page and reads Open Graph metadata from each linked article.
//!
//! # Listing markup
//!
//! Each story on the section page is an `h2` whose first link points at the
//! article. The teaser paragraph is either the `p` directly after the
//! headline or the first `p` inside the element directly after it; both
//! shapes show up on the live page, so both are tried in that order.

use crate::config::PipelineConfig;
use crate::error::ScrapeError;
use crate::fetcher::PageFetcher;
use crate::models::{ArticleDetails, RawEntry};
use crate::utils::{element_text, is_absolute_http_url, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

static HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());

/// Index the listing page and return its headlines.
///
/// Fetches `config.listing_url` and extracts up to `config.max_articles`
/// entries in document order.
///
/// # Errors
///
/// - [`ScrapeError::Fetch`] if the listing request fails or times out
/// - [`ScrapeError::NoArticles`] if no headline survives filtering, which
///   usually means the page markup changed
#[instrument(level = "info", skip_all, fields(url = %config.listing_url))]
pub async fn index_articles<F: PageFetcher>(
    fetcher: &F,
    config: &PipelineConfig,
) -> Result<Vec<RawEntry>, ScrapeError> {
    let html = fetcher
        .fetch(&config.listing_url, config.listing_timeout)
        .await?;

    let mut entries = parse_listing(&html);
    if entries.is_empty() {
        warn!(
            body_preview = %truncate_for_log(&html, 200),
            "Listing page yielded no headlines"
        );
        return Err(ScrapeError::NoArticles);
    }

    let found = entries.len();
    entries.truncate(config.max_articles);
    info!(found, kept = entries.len(), "Indexed NDTV headlines");
    debug!(links = ?entries.iter().map(|e| &e.link).collect::<Vec<_>>(), "NDTV links");

    Ok(entries)
}

/// Extract every valid headline from a listing page, in document order.
///
/// A headline is skipped when its link text is empty, it has no `href`, or
/// the `href` is not an absolute http(s) URL.
pub fn parse_listing(html: &str) -> Vec<RawEntry> {
    let document = Html::parse_document(html);

    document
        .select(&HEADLINE)
        .filter_map(|headline| {
            let anchor = headline.select(&LINK).next()?;
            let title = element_text(anchor);
            let link = anchor.value().attr("href")?.trim();
            if title.is_empty() || !is_absolute_http_url(link) {
                return None;
            }
            Some(RawEntry {
                title,
                link: link.to_string(),
                summary: summary_for(headline),
            })
        })
        .collect()
}

/// Teaser text for a headline: the next sibling `p`, else the first `p`
/// inside the next sibling element, else empty.
fn summary_for(headline: ElementRef<'_>) -> String {
    let Some(next) = headline.next_siblings().find_map(ElementRef::wrap) else {
        return String::new();
    };

    if next.value().name() == "p" {
        let text = element_text(next);
        if !text.is_empty() {
            return text;
        }
    }

    next.select(&PARAGRAPH)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Fetch an article page and read its Open Graph image and description.
///
/// Never fails: any error is logged and reported as empty details, so one
/// broken article cannot abort its batch.
#[instrument(level = "info", skip(fetcher, entry), fields(url = %entry.link))]
pub async fn enrich<F: PageFetcher>(
    fetcher: &F,
    entry: &RawEntry,
    timeout: Duration,
) -> ArticleDetails {
    match fetcher.fetch(&entry.link, timeout).await {
        Ok(html) => {
            let details = parse_article_details(&html);
            debug!(
                has_image = !details.image.is_empty(),
                has_description = !details.description.is_empty(),
                "Parsed NDTV article metadata"
            );
            details
        }
        Err(e) => {
            warn!(error = %e, title = %entry.title, "Failed to fetch article details");
            ArticleDetails::default()
        }
    }
}

/// Read `og:image` and `og:description` from an article page.
pub fn parse_article_details(html: &str) -> ArticleDetails {
    let document = Html::parse_document(html);
    ArticleDetails {
        image: meta_content(&document, &OG_IMAGE),
        description: meta_content(&document, &OG_DESCRIPTION),
    }
}

/// `content` of the first meta tag matching `selector`, or empty.
fn meta_content(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_default()
}
