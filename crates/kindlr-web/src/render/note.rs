//! Text note (kind 1) views.

use maud::{Markup, html};

use kindlr_core::SampleEvent;
use kindlr_core::nip19::{hex_to_note, is_hex64, pubkey_uri, shorten_entity, short_npub};
use kindlr_core::time::{format_datetime, format_time_ago};

use super::RenderContext;
use super::components::linkified;

/// Characters of content kept by the compact view.
const COMPACT_CHARS: usize = 140;

/// Id of the event this note replies to: the `e` tag marked `reply`, else
/// the one marked `root`.
fn reply_target(event: &SampleEvent) -> Option<&str> {
    let marked = |marker: &str| {
        event
            .tags_named("e")
            .find(|t| t.get(3).is_some_and(|m| m == marker))
            .and_then(|t| t.get(1))
            .map(String::as_str)
    };
    marked("reply").or_else(|| marked("root"))
}

fn hashtags(event: &SampleEvent) -> Vec<&str> {
    event
        .tags_named("t")
        .filter_map(|t| t.get(1))
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect()
}

fn note_time(event: &SampleEvent, ctx: &RenderContext) -> Markup {
    html! {
        span class="note-time" title=(format_datetime(event.created_at)) {
            (format_time_ago(event.created_at, ctx.now))
        }
    }
}

/// Author, time, linkified content, hashtags and reply context.
pub fn full(event: &SampleEvent, ctx: &RenderContext) -> Markup {
    let tags = hashtags(event);

    html! {
        div class="note" {
            div class="note-head" {
                a class="npub" href=(pubkey_uri(&event.pubkey)) title=(event.pubkey) {
                    (short_npub(&event.pubkey))
                }
                (note_time(event, ctx))
            }

            @if let Some(parent) = reply_target(event) {
                div class="reply-context" {
                    "Reply to "
                    @if is_hex64(parent) {
                        a href={"/1/" (parent)} {
                            (shorten_entity(&hex_to_note(parent).unwrap_or_else(|| parent.to_string()), true))
                        }
                    } @else {
                        span class="reply-id" { (shorten_entity(parent, true)) }
                    }
                }
            }

            div class="content" { (linkified(&event.content)) }

            @if !tags.is_empty() {
                div class="hashtags" {
                    @for tag in &tags {
                        a href={"/?q=" (urlencoding::encode(tag))} { "#" (tag) }
                    }
                }
            }
        }
    }
}

/// Content cut to 140 characters, with the relative time.
pub fn compact(event: &SampleEvent, ctx: &RenderContext) -> Markup {
    let content = if event.content.chars().count() > COMPACT_CHARS {
        let cut: String = event.content.chars().take(COMPACT_CHARS).collect();
        format!("{cut}...")
    } else {
        event.content.clone()
    };

    html! {
        div class="note compact" {
            div class="content" { (content) }
            (note_time(event, ctx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::{NOW, event};

    const CTX: RenderContext = RenderContext { now: NOW };

    #[test]
    fn test_full_links_content_and_hashtags() {
        let note = event(
            1,
            "gm https://example.com",
            &[&["t", "nostr"], &["t", ""], &["p", "abc"]],
        );
        let html = full(&note, &CTX).into_string();

        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("#nostr"));
        assert!(html.contains("2 minutes ago"));
        assert!(html.contains("npub1"));
        assert!(!html.contains("Reply to"));
    }

    #[test]
    fn test_full_prefers_reply_marker_over_root() {
        let root = "a".repeat(64);
        let reply = "b".repeat(64);
        let note = event(
            1,
            "ok",
            &[
                &["e", root.as_str(), "", "root"],
                &["e", reply.as_str(), "", "reply"],
            ],
        );
        let html = full(&note, &CTX).into_string();
        assert!(html.contains("Reply to"));
        assert!(html.contains(&format!("href=\"/1/{reply}\"")));
        assert!(html.contains("note1"));
    }

    #[test]
    fn test_full_uses_root_when_no_reply_marker() {
        let root = "a".repeat(64);
        let note = event(1, "ok", &[&["e", root.as_str(), "", "root"]]);
        let html = full(&note, &CTX).into_string();
        assert!(html.contains(&format!("href=\"/1/{root}\"")));
    }

    #[test]
    fn test_unmarked_e_tags_are_not_replies() {
        let note = event(1, "ok", &[&["e", "abc"]]);
        assert!(!full(&note, &CTX).into_string().contains("Reply to"));
    }

    #[test]
    fn test_full_encodes_hashtag_queries() {
        let note = event(1, "hi", &[&["t", "rust&k=3"], &["t", "c#"]]);
        let html = full(&note, &CTX).into_string();

        assert!(html.contains("href=\"/?q=rust%26k%3D3\""));
        assert!(html.contains("href=\"/?q=c%23\""));
        assert!(html.contains("#rust&amp;k=3"));
    }

    #[test]
    fn test_full_does_not_link_malformed_reply_ids() {
        let note = event(1, "ok", &[&["e", "xyz", "", "reply"]]);
        let html = full(&note, &CTX).into_string();

        assert!(html.contains("Reply to"));
        assert!(html.contains(">xyz<"));
        assert!(!html.contains("href=\"/1/"));
    }

    #[test]
    fn test_compact_truncates_by_characters() {
        let long = "é".repeat(200);
        let html = compact(&event(1, &long, &[]), &CTX).into_string();
        assert!(html.contains(&format!("{}...", "é".repeat(140))));
        assert!(!html.contains(&"é".repeat(141)));
    }

    #[test]
    fn test_compact_keeps_short_content() {
        let html = compact(&event(1, "short", &[]), &CTX).into_string();
        assert!(html.contains(">short<"));
        assert!(!html.contains("..."));
    }
}
