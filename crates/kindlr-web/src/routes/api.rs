//! JSON API for programmatic consumers.
//!
//! ```json
//! GET /api/kinds?q=k=1
//! {
//!   "query": "k=1",
//!   "criteria": { "kind": [1], ... },
//!   "kinds": [ { "kind": 1, "name": "...", "variants": ["full", "compact"], "default_variant": "compact", ... } ]
//! }
//! ```

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kindlr_core::{KindDescriptor, SampleEvent, SearchCriteria, Variant, filter_catalog, parse_search_query};

use super::home::{SearchParams, load_samples};
use crate::error::WebError;
use crate::resolve::parse_kind;
use crate::state::AppState;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    error: &'static str,
    message: String,
}

/// Errors on `/api` are JSON, not HTML pages.
pub struct JsonError(WebError);

impl From<WebError> for JsonError {
    fn from(err: WebError) -> Self {
        Self(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "api request failed");
        }
        let error = match status {
            StatusCode::BAD_REQUEST => "invalid_request",
            StatusCode::NOT_FOUND => "not_found",
            _ => "internal_error",
        };
        let body = ApiError {
            error,
            message: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct KindEntry<'a> {
    #[serde(flatten)]
    descriptor: &'a KindDescriptor,
    variants: &'a [Variant],
    default_variant: Option<Variant>,
}

#[derive(Debug, Serialize)]
pub struct KindList<'a> {
    query: &'a str,
    criteria: &'a SearchCriteria,
    kinds: Vec<KindEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct KindEvents<'a> {
    kind: u16,
    events: &'a [SampleEvent],
}

/// `GET /api/kinds?q=`: matching descriptors in catalog order.
pub async fn list_kinds(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.trim();
    let criteria = parse_search_query(query);
    let samples = load_samples(&state, &criteria).await;

    let kinds = filter_catalog(&state.registry, &criteria, |kind| {
        samples
            .get(&kind)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    })
    .into_iter()
    .map(|descriptor| KindEntry {
        descriptor,
        variants: state.registry.list_variants(descriptor.kind),
        default_variant: state.registry.default_variant(descriptor.kind),
    })
    .collect();

    Json(KindList {
        query,
        criteria: &criteria,
        kinds,
    })
    .into_response()
}

/// `GET /api/kinds/{kind}/events`: the cached samples for a kind.
pub async fn kind_events(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, JsonError> {
    let kind = parse_kind(&kind)?;
    if state.registry.lookup(kind).is_none() {
        return Err(WebError::NotFound(format!("Kind {kind} not found")).into());
    }

    let events = state.samples_for(kind).await?;
    Ok(Json(KindEvents {
        kind,
        events: &events,
    })
    .into_response())
}
