//! Catalog pages: the searchable kind list, the per-kind page and the
//! single-variant embed view.

use maud::{Markup, html};

use kindlr_core::{KindDescriptor, SampleEvent, Variant, ViewTable};

use super::components::{
    doc_links, embed_shell, kind_badge, nostr_link, page_shell, raw_json, truncate,
};
use super::{RenderContext, ViewFn, generic, render_event};
use kindlr_core::nip19::event_uri;

/// One card in the catalog grid.
pub struct Teaser<'a> {
    pub descriptor: &'a KindDescriptor,
    pub sample: Option<&'a SampleEvent>,
}

fn no_events(kind: u16) -> Markup {
    html! {
        p class="empty" { "No events found for kind " (kind) }
    }
}

/// Kind summary with the latest sample shown through its default view.
pub fn teaser(teaser: &Teaser<'_>, views: &ViewTable<ViewFn>, ctx: &RenderContext) -> Markup {
    let d = teaser.descriptor;
    html! {
        article class="card" {
            (kind_badge(d.kind))
            h2 { a href={"/" (d.kind)} { (d.name) } }
            p class="card-desc" { (d.short_description) }
            (doc_links(d))

            div class="card-section" {
                @match teaser.sample {
                    Some(event) => {
                        @if let Some(view) = render_event(views, event, None, ctx) {
                            (view)
                        }
                        (raw_json(event))
                    }
                    None => { (no_events(d.kind)) }
                }
            }
        }
    }
}

/// The home page: search box, help and the matching kinds.
pub fn home_page(
    query: &str,
    teasers: &[Teaser<'_>],
    views: &ViewTable<ViewFn>,
    ctx: &RenderContext,
) -> Markup {
    let title = if query.trim().is_empty() {
        "Kindlr | Nostr event kinds".to_string()
    } else {
        format!("{} | Kindlr", truncate(query.trim(), 60))
    };

    let body = html! {
        p class="search-help" {
            "Filter with "
            code { "k=1,3" } ", "
            code { "content:word" } ", "
            code { "content=json" } " / " code { "content!=json" } ", "
            code { "tags:name" } " and "
            code { "pubkey:hex" }
            ". Anything else is matched against names, descriptions and events."
        }
        @if teasers.is_empty() {
            p class="empty" { "No matching events found" }
        } @else {
            section class="catalog" {
                @for t in teasers {
                    (teaser(t, views, ctx))
                }
            }
        }
    };

    page_shell(&title, "Browse Nostr event kinds with live samples.", query, body)
}

/// Descriptor card, every declared view of `event`, the field view and raw
/// JSON.
pub fn kind_page(
    descriptor: &KindDescriptor,
    event: Option<&SampleEvent>,
    views: &ViewTable<ViewFn>,
    ctx: &RenderContext,
) -> Markup {
    let title = format!("Kind {}: {} | Kindlr", descriptor.kind, descriptor.name);

    let body = html! {
        article class="card" {
            (kind_badge(descriptor.kind))
            h2 { (descriptor.name) }
            p class="card-desc" { (descriptor.description) }
            (doc_links(descriptor))
        }

        @match event {
            None => { (no_events(descriptor.kind)) }
            Some(event) => {
                @for (variant, render) in views.variants_of(descriptor.kind) {
                    section class="card card-section" {
                        h3 {
                            (variant) " "
                            a href=(format!("/{}/{}/{}", descriptor.kind, variant, event.id)) { "embed" }
                        }
                        (render(event, ctx))
                    }
                }
                section class="card card-section" {
                    h3 { "Fields" }
                    (generic::render(event, ctx))
                    (raw_json(event))
                }
                (nostr_link(&event_uri(&event.id)))
            }
        }
    };

    page_shell(&title, descriptor.short_description, "", body)
}

/// A single variant of one event, without the site chrome.
pub fn embed_page(
    descriptor: &KindDescriptor,
    variant: Variant,
    view: Markup,
) -> Markup {
    let title = format!("Kind {} ({variant}) | Kindlr", descriptor.kind);
    embed_shell(&title, html! { div class="card" { (view) } })
}
