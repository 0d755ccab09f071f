//! Route definitions for the catalog service.
//!
//! ## Routes
//!
//! - `GET /?q=` - Catalog of kinds, filtered by the search query
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /api/kinds?q=` - Matching kind descriptors (JSON)
//! - `GET /api/kinds/{kind}/events` - Cached samples for a kind (JSON)
//! - `GET /{kind}` - Kind page with the latest sample
//! - `GET /{kind}/{event_id}` - Kind page for a specific event
//! - `GET /{kind}/{variant}/{event_id}` - One view of an event, embeddable

mod api;
mod health;
mod home;
mod kind;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::Markup;

use crate::render::components::{CSP_HEADER, CSP_HEADER_EMBED};
use crate::state::AppState;

/// Build the complete catalog router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/api/kinds", get(api::list_kinds))
        .route("/api/kinds/{kind}/events", get(api::kind_events))
        .route("/{kind}", get(kind::kind_page))
        .route("/{kind}/{event_id}", get(kind::event_page))
        .route("/{kind}/{variant}/{event_id}", get(kind::embed_page))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// How an HTML page may be embedded and cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageKind {
    /// Regular page: no framing, short cache.
    Page,
    /// Embed view: framing allowed.
    Embed,
}

/// Build an HTTP response with HTML content and security/cache headers.
pub(crate) fn html_response(markup: Markup, page: PageKind, max_age: u32) -> Response {
    let html = markup.into_string();
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    let csp = match page {
        PageKind::Page => CSP_HEADER,
        PageKind::Embed => CSP_HEADER_EMBED,
    };
    headers.insert(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(csp));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    if page == PageKind::Page {
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    }

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    let cache_value = format!("public, max-age={max_age}, stale-while-revalidate={max_age}");
    if let Ok(val) = HeaderValue::from_str(&cache_value) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    (StatusCode::OK, headers, html).into_response()
}
