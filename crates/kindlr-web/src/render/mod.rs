//! HTML rendering for kinds and sample events.
//!
//! Kinds registered with display variants get specialized renderers, looked
//! up through a [`ViewTable`] of plain function pointers. Every other kind is
//! shown by the generic field view in [`generic`].
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod catalog;
pub mod components;
pub mod follows;
pub mod generic;
pub mod note;
pub mod profile;

use maud::Markup;

use kindlr_core::metrics::VIEWS_RENDERED_TOTAL;
use kindlr_core::{Dispatch, KindRegistry, SampleEvent, Variant, ViewTable};

/// Values shared by every renderer for one request.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Unix seconds used for relative times.
    pub now: u64,
}

impl RenderContext {
    pub fn current() -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        Self { now }
    }
}

/// A specialized view of one event.
pub type ViewFn = fn(&SampleEvent, &RenderContext) -> Markup;

/// Build the view table for `registry` from the built-in renderers.
///
/// # Errors
///
/// Fails if the registry declares a variant that has no renderer here.
pub fn view_table(registry: &KindRegistry) -> kindlr_core::Result<ViewTable<ViewFn>> {
    let renderers: [((u16, Variant), ViewFn); 6] = [
        ((0, Variant::Full), profile::full),
        ((0, Variant::Compact), profile::compact),
        ((1, Variant::Full), note::full),
        ((1, Variant::Compact), note::compact),
        ((3, Variant::Full), follows::full),
        ((3, Variant::Compact), follows::compact),
    ];
    ViewTable::new(registry, renderers)
}

/// Render `event` through the dispatched view, or the generic field view
/// when the kind has no specialized renderer.
///
/// Returns `None` only when `variant` was requested and is not available
/// for the event's kind.
pub fn render_event(
    views: &ViewTable<ViewFn>,
    event: &SampleEvent,
    variant: Option<&str>,
    ctx: &RenderContext,
) -> Option<Markup> {
    match views.resolve(event.kind, variant) {
        Dispatch::Specialized { variant, render } => {
            metrics::counter!(VIEWS_RENDERED_TOTAL, "view" => variant.as_str()).increment(1);
            Some(render(event, ctx))
        }
        Dispatch::Fallback => {
            metrics::counter!(VIEWS_RENDERED_TOTAL, "view" => "fallback").increment(1);
            Some(generic::render(event, ctx))
        }
        Dispatch::Unavailable => None,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use kindlr_core::SampleEvent;

    pub const PUBKEY: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";
    pub const NOW: u64 = 1_700_000_000;

    pub fn event(kind: u16, content: &str, tags: &[&[&str]]) -> SampleEvent {
        SampleEvent {
            id: "d".repeat(64),
            pubkey: PUBKEY.to_string(),
            created_at: NOW - 120,
            kind,
            tags: tags
                .iter()
                .map(|t| t.iter().map(|s| s.to_string()).collect())
                .collect(),
            content: content.to_string(),
            sig: "f".repeat(128),
        }
    }
}
