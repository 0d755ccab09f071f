//! Generic field view for kinds without a specialized renderer.
//!
//! Shows every event field. JSON content is broken into key/value rows and
//! tags are labeled by name.

use maud::{Markup, html};
use serde_json::Value;

use kindlr_core::SampleEvent;
use kindlr_core::json::{json_key_count, parse_json_content};
use kindlr_core::nip19::{pubkey_uri, short_npub};
use kindlr_core::tags::tag_label;
use kindlr_core::time::{format_datetime, format_time_ago};

use super::RenderContext;

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn empty_marker(text: &str) -> Markup {
    html! {
        @if text.is_empty() {
            em class="empty" { "(empty)" }
        } @else {
            (text)
        }
    }
}

fn content(event: &SampleEvent) -> Markup {
    if event.content.is_empty() {
        return html! { em class="empty" { "No content" } };
    }

    let Some(parsed) = parse_json_content(&event.content) else {
        return html! { div class="content" { (event.content) } };
    };

    let rows: Vec<(String, String)> = match &parsed {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), value_text(v))).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), value_text(v)))
            .collect(),
        _ => Vec::new(),
    };

    html! {
        span class="json-count" { (json_key_count(&parsed)) " keys" }
        div class="json-rows" {
            @for (key, value) in &rows {
                span class="json-key" { (key) }
                span title=(value) { (empty_marker(value)) }
            }
        }
    }
}

fn tags(event: &SampleEvent) -> Markup {
    if event.tags.is_empty() {
        return html! { em class="empty" { "No tags" } };
    }

    html! {
        span class="json-count" { (event.tags.len()) }
        @for tag in &event.tags {
            div class="tag-row" {
                span class="tag-label" { (tag_label(tag.first().map(String::as_str).unwrap_or(""))) }
                @if tag.len() <= 1 {
                    em class="empty" { "(no values)" }
                } @else {
                    span {
                        @for (i, part) in tag.iter().skip(1).enumerate() {
                            @if i > 0 { " · " }
                            (empty_marker(part))
                        }
                    }
                }
            }
        }
    }
}

/// Every field of `event`.
pub fn render(event: &SampleEvent, ctx: &RenderContext) -> Markup {
    html! {
        dl class="fields" {
            dt { "Id" }
            dd { (event.id) }
            dt { "Pubkey" }
            dd {
                a href=(pubkey_uri(&event.pubkey)) title=(event.pubkey) { (short_npub(&event.pubkey)) }
            }
            dt { "Created" }
            dd title=(format_datetime(event.created_at)) { (format_time_ago(event.created_at, ctx.now)) }
            dt { "Kind" }
            dd { (event.kind) }
            dt { "Content" }
            dd { (content(event)) }
            dt { "Tags" }
            dd { (tags(event)) }
            dt { "Signature" }
            dd { (event.sig) }
        }
    }
}
