//! Home page: the searchable kind catalog.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use futures::future::join_all;
use serde::Deserialize;

use kindlr_core::metrics::SEARCH_QUERIES_TOTAL;
use kindlr_core::{SampleEvent, SearchCriteria, filter_catalog, parse_search_query};

use super::{PageKind, html_response};
use crate::render::RenderContext;
use crate::render::catalog::{self, Teaser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Kinds whose samples are needed to answer `criteria`.
fn candidate_kinds(state: &AppState, criteria: &SearchCriteria) -> Vec<u16> {
    state
        .registry
        .descriptors()
        .iter()
        .map(|d| d.kind)
        .filter(|kind| {
            criteria
                .kind
                .as_ref()
                .is_none_or(|kinds| kinds.contains(&u64::from(*kind)))
        })
        .collect()
}

/// Load samples for every candidate kind concurrently.
pub(crate) async fn load_samples(
    state: &AppState,
    criteria: &SearchCriteria,
) -> HashMap<u16, Arc<Vec<SampleEvent>>> {
    let kinds = candidate_kinds(state, criteria);
    let loads = kinds.iter().map(|&kind| async move {
        (kind, state.samples_or_empty(kind).await)
    });
    join_all(loads).await.into_iter().collect()
}

/// Render the catalog, filtered by `?q=`.
pub async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.trim();
    let criteria = parse_search_query(query);

    if !criteria.is_empty() {
        metrics::counter!(SEARCH_QUERIES_TOTAL).increment(1);
        tracing::debug!(query, fields = criteria.field_count(), "search query");
    }

    let samples = load_samples(&state, &criteria).await;
    let matching = filter_catalog(&state.registry, &criteria, |kind| {
        samples
            .get(&kind)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    });

    let teasers: Vec<Teaser<'_>> = matching
        .into_iter()
        .map(|descriptor| Teaser {
            descriptor,
            sample: samples.get(&descriptor.kind).and_then(|events| events.first()),
        })
        .collect();

    tracing::debug!(matches = teasers.len(), "catalog filtered");

    let ctx = RenderContext::current();
    html_response(
        catalog::home_page(query, &teasers, &state.views, &ctx),
        PageKind::Page,
        60,
    )
}
