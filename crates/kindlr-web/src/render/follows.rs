//! Follow list (kind 3) views.

use maud::{Markup, html};

use kindlr_core::SampleEvent;
use kindlr_core::color::color_from_string;
use kindlr_core::nip19::{pubkey_uri, short_npub};
use kindlr_core::time::format_time_ago;

use super::RenderContext;
use super::components::avatar;

/// Avatars shown before the "+N" overflow in the compact view.
const COMPACT_AVATARS: usize = 5;

fn followed(event: &SampleEvent) -> Vec<&str> {
    event
        .tags_named("p")
        .filter_map(|t| t.get(1))
        .map(String::as_str)
        .filter(|pk| !pk.is_empty())
        .collect()
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "Following 1 profile".to_string()
    } else {
        format!("Following {n} profiles")
    }
}

/// Count, time and the full list of followed profiles.
pub fn full(event: &SampleEvent, ctx: &RenderContext) -> Markup {
    let follows = followed(event);

    html! {
        div class="follows" {
            div class="note-head" {
                strong { (count_label(follows.len())) }
                span class="note-time" { (format_time_ago(event.created_at, ctx.now)) }
            }
            @if follows.is_empty() {
                p class="empty" { "No follows" }
            } @else {
                ul class="follow-list" {
                    @for pubkey in &follows {
                        li {
                            span class="swatch" style={"background:" (color_from_string(pubkey))} {}
                            a class="npub" href=(pubkey_uri(pubkey)) title=(pubkey) { (short_npub(pubkey)) }
                        }
                    }
                }
            }
        }
    }
}

/// Count with a row of the first few avatars.
pub fn compact(event: &SampleEvent, _ctx: &RenderContext) -> Markup {
    let follows = followed(event);
    let overflow = follows.len().saturating_sub(COMPACT_AVATARS);

    html! {
        div class="follows compact" {
            strong { (count_label(follows.len())) }
            @if !follows.is_empty() {
                div class="avatar-row" {
                    @for pubkey in follows.iter().take(COMPACT_AVATARS) {
                        (avatar(&color_from_string(pubkey), None, pubkey, "sm"))
                    }
                    @if overflow > 0 {
                        span class="avatar-more" { "+" (overflow) }
                    }
                }
            }
        }
    }
}
