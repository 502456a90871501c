//! Outbound page fetching.
//!
//! The scrapers never talk to `reqwest` directly; they go through the
//! [`PageFetcher`] trait so the same pipeline runs against the live site in
//! production and against canned pages in tests.
//!
//! # Request policy
//!
//! Every request made by [`HttpFetcher`]:
//! - identifies itself with a desktop browser `User-Agent`
//! - follows at most `max_redirects` redirects
//! - fails after the timeout supplied by the caller
//! - treats any non-2xx status as an error

use crate::error::FetchError;
use reqwest::{redirect, Client};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Browser-like identification sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for fetching an HTML page as text.
///
/// Implementors must be shareable across the concurrent requests of one
/// enrichment batch, hence `Send + Sync` and a `Send` future.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page
    /// * `timeout` - Time allowed for the whole request, body included
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the client once at startup.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(max_redirects: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .redirect(redirect::Policy::limited(max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self), fields(timeout_ms = timeout.as_millis() as u64))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Upstream returned error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Redirect, Response};
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;

    async fn hop(Path(n): Path<u32>) -> Response {
        if n == 0 {
            "arrived".into_response()
        } else {
            Redirect::temporary(&format!("/hop/{}", n - 1)).into_response()
        }
    }

    async fn echo_user_agent(headers: HeaderMap) -> String {
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    /// Serve a small upstream on an ephemeral local port.
    async fn spawn_upstream() -> SocketAddr {
        let app = Router::new()
            .route("/hop/:n", get(hop))
            .route("/ua", get(echo_user_agent))
            .route("/unavailable", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/slow", get(slow));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(3).is_ok());
    }

    #[tokio::test]
    async fn test_sends_browser_user_agent() {
        let addr = spawn_upstream().await;
        let fetcher = HttpFetcher::new(3).unwrap();

        let body = fetcher.fetch(&format!("http://{addr}/ua"), TIMEOUT).await.unwrap();
        assert_eq!(body, BROWSER_USER_AGENT);
    }

    #[tokio::test]
    async fn test_follows_up_to_redirect_limit() {
        let addr = spawn_upstream().await;
        let fetcher = HttpFetcher::new(3).unwrap();

        let body = fetcher.fetch(&format!("http://{addr}/hop/3"), TIMEOUT).await.unwrap();
        assert_eq!(body, "arrived");
    }

    #[tokio::test]
    async fn test_too_many_redirects_is_request_error() {
        let addr = spawn_upstream().await;
        let fetcher = HttpFetcher::new(3).unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/hop/4"), TIMEOUT)
            .await
            .unwrap_err();
        match err {
            FetchError::Request { source, .. } => assert!(source.is_redirect()),
            other => panic!("expected redirect failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error() {
        let addr = spawn_upstream().await;
        let fetcher = HttpFetcher::new(3).unwrap();
        let url = format!("http://{addr}/unavailable");

        let err = fetcher.fetch(&url, TIMEOUT).await.unwrap_err();
        match err {
            FetchError::Status { url: failed, status } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let addr = spawn_upstream().await;
        let fetcher = HttpFetcher::new(3).unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/slow"), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
