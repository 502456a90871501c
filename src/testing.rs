//! In-process [`PageFetcher`] used by the unit tests.

use crate::error::FetchError;
use crate::fetcher::PageFetcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
    Timeout,
}

/// Serves canned pages per URL, optionally after a delay, and records how many
/// requests were in flight at once.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, (Reply, Duration)>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), (Reply::Body(body.to_string()), Duration::ZERO));
        self
    }

    pub fn slow_page(mut self, url: &str, body: &str, delay: Duration) -> Self {
        self.pages
            .insert(url.to_string(), (Reply::Body(body.to_string()), delay));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages
            .insert(url.to_string(), (Reply::Status(status), Duration::ZERO));
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.pages
            .insert(url.to_string(), (Reply::Timeout, Duration::ZERO));
        self
    }

    /// Highest number of concurrent `fetch` calls observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// URLs requested, in the order the requests started.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let (reply, delay) = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or((Reply::Status(404), Duration::ZERO));
        // Yield at least once so sibling requests overlap with this one.
        tokio::time::sleep(delay).await;
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Reply::Timeout => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}

/// Article page carrying the given Open Graph tags.
pub fn article_page(image: Option<&str>, description: Option<&str>) -> String {
    let mut head = String::new();
    if let Some(image) = image {
        head.push_str(&format!(r#"<meta property="og:image" content="{image}">"#));
    }
    if let Some(description) = description {
        head.push_str(&format!(
            r#"<meta property="og:description" content="{description}">"#
        ));
    }
    format!("<html><head>{head}</head><body><p>Body text</p></body></html>")
}

/// Listing page with one `h2` headline plus teaser paragraph per `(title, link)`.
pub fn listing_page(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(title, link)| {
            format!(r#"<h2><a href="{link}">{title}</a></h2><p>Summary of {title}</p>"#)
        })
        .collect();
    format!("<html><body><div class=\"news\">{items}</div></body></html>")
}
