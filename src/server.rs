//! HTTP surface: routes, CORS and response shaping.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | [`api_info`] – static description of the API |
//! | `GET /api/news` | [`news_handler`] – runs the scraping pipeline |

use crate::config::{AppConfig, PipelineConfig};
use crate::fetcher::PageFetcher;
use crate::models::{CATEGORY, ErrorResponse, NewsResponse, SOURCE_NAME};
use crate::pipeline::scrape_news;
use crate::utils::iso_timestamp;
use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Version reported by `GET /` and the `X-API-Version` header.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Browsers may reuse `/api/news` responses for this long.
const CACHE_CONTROL: &str = "public, max-age=300";

/// Shared, read-only state of every request.
pub struct AppState<F> {
    pub fetcher: Arc<F>,
    pub pipeline: Arc<PipelineConfig>,
    pub powered_by: Arc<str>,
}

// Manual impl: cloning the state never needs `F: Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            pipeline: Arc::clone(&self.pipeline),
            powered_by: Arc::clone(&self.powered_by),
        }
    }
}

impl<F> AppState<F> {
    pub fn new(fetcher: F, config: &AppConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            pipeline: Arc::new(config.pipeline.clone()),
            powered_by: Arc::from(config.powered_by.as_str()),
        }
    }
}

/// Build the Axum application router.
pub fn build_router<F>(state: AppState<F>, cors_origins: &[String]) -> Router
where
    F: PageFetcher + 'static,
{
    Router::new()
        .route("/", get(api_info))
        .route("/api/news", get(news_handler::<F>))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins, with credentials.
///
/// Origins that are not valid header values are logged and left out.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// `GET /`
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Trending News API",
        "version": API_VERSION,
        "endpoints": {
            "/api/news": "GET - Fetch latest NDTV India news in JSON format"
        },
        "example": {
            "title": "Article Title",
            "link": "https://example.com/article",
            "image": "https://example.com/image.jpg",
            "description": "Article description",
            "source": SOURCE_NAME,
            "category": CATEGORY
        }
    }))
}

/// `GET /api/news`
///
/// Runs the pipeline and answers `200` with the articles, or `500` with the
/// failure reason. Both carry the cache and version headers.
pub async fn news_handler<F>(State(state): State<AppState<F>>) -> Response
where
    F: PageFetcher + 'static,
{
    let headers = [
        ("cache-control", CACHE_CONTROL.to_string()),
        ("x-api-version", API_VERSION.to_string()),
        ("x-powered-by", state.powered_by.to_string()),
    ];

    let t0 = Instant::now();
    match scrape_news(state.fetcher.as_ref(), &state.pipeline).await {
        Ok(articles) => {
            let execution_time = format!("{}ms", t0.elapsed().as_millis());
            info!(count = articles.len(), %execution_time, "Served news");
            let body = NewsResponse {
                success: true,
                count: articles.len(),
                data: articles,
                timestamp: iso_timestamp(),
                execution_time,
            };
            (StatusCode::OK, headers, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error fetching news");
            let body = ErrorResponse {
                success: false,
                error: "Failed to fetch news".to_string(),
                message: format!("Error during scraping: {e}"),
                timestamp: iso_timestamp(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, headers, Json(body)).into_response()
        }
    }
}
