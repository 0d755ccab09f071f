//! Per-kind pages and the embeddable single-view route.

use axum::extract::{Path, State};
use axum::response::Response;

use kindlr_core::{Dispatch, KindDescriptor};

use super::{PageKind, html_response};
use crate::error::WebError;
use crate::render::RenderContext;
use crate::render::catalog;
use crate::resolve::{parse_event_id, parse_kind};
use crate::state::AppState;

fn descriptor<'a>(state: &'a AppState, segment: &str) -> Result<&'a KindDescriptor, WebError> {
    let kind = parse_kind(segment)?;
    state
        .registry
        .lookup(kind)
        .ok_or_else(|| WebError::NotFound(format!("Kind {kind} not found")))
}

/// `GET /{kind}`: the kind with its newest sample.
pub async fn kind_page(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, WebError> {
    let descriptor = descriptor(&state, &kind)?;
    let samples = state.samples_or_empty(descriptor.kind).await;

    let ctx = RenderContext::current();
    let markup = catalog::kind_page(descriptor, samples.first(), &state.views, &ctx);
    Ok(html_response(markup, PageKind::Page, 60))
}

/// `GET /{kind}/{event_id}`: the kind page for one event.
pub async fn event_page(
    State(state): State<AppState>,
    Path((kind, event_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let descriptor = descriptor(&state, &kind)?;
    let id = parse_event_id(&event_id)?;

    let event = state
        .event_for(descriptor.kind, &id)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("Event {id} not found for kind {}", descriptor.kind)))?;

    let ctx = RenderContext::current();
    let markup = catalog::kind_page(descriptor, Some(&event), &state.views, &ctx);
    Ok(html_response(markup, PageKind::Page, 300))
}

/// `GET /{kind}/{variant}/{event_id}`: one declared view, framable.
pub async fn embed_page(
    State(state): State<AppState>,
    Path((kind, variant, event_id)): Path<(String, String, String)>,
) -> Result<Response, WebError> {
    let descriptor = descriptor(&state, &kind)?;

    let (variant, render) = match state.views.resolve(descriptor.kind, Some(&variant)) {
        Dispatch::Specialized { variant, render } => (variant, *render),
        Dispatch::Fallback | Dispatch::Unavailable => {
            return Err(WebError::NotFound(format!(
                "Kind {} has no '{variant}' view",
                descriptor.kind
            )));
        }
    };

    let id = parse_event_id(&event_id)?;
    let event = state
        .event_for(descriptor.kind, &id)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("Event {id} not found for kind {}", descriptor.kind)))?;

    let ctx = RenderContext::current();
    let markup = catalog::embed_page(descriptor, variant, render(&event, &ctx));
    Ok(html_response(markup, PageKind::Embed, 300))
}
