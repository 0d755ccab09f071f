//! Profile (kind 0) views.
//!
//! The full view shows banner, avatar, name, about text and the metadata
//! links. The compact view is a single avatar line.

use maud::{Markup, PreEscaped, html};

use kindlr_core::SampleEvent;
use kindlr_core::nip19::{pubkey_uri, short_npub};
use kindlr_core::profile::ProfileMetadata;

use super::RenderContext;
use super::components::{ICON_LIGHTNING, avatar, is_safe_url, linkified, truncate};

/// Full profile card.
pub fn full(event: &SampleEvent, _ctx: &RenderContext) -> Markup {
    let metadata = ProfileMetadata::from_json(&event.content);
    let name = metadata.display_name(Some(&event.pubkey));
    let picture = metadata.picture(&event.pubkey);
    let banner = metadata.banner(&event.pubkey);

    html! {
        div class="profile" {
            div class="profile-banner" style={"background:" (banner.fallback_color)} {
                @if let Some(url) = banner.url.as_deref().filter(|u| is_safe_url(u)) {
                    img src=(url) alt="" loading="lazy";
                }
            }

            div class="profile-header" {
                (avatar(&picture.fallback_color, picture.url.as_deref(), &name, "lg"))
            }

            div class="profile-name" { (name) }
            a class="npub" href=(pubkey_uri(&event.pubkey)) title=(event.pubkey) {
                (short_npub(&event.pubkey))
            }

            @if metadata.is_deleted() {
                p class="profile-deleted" { "This profile has been deleted." }
            }

            @if let Some(about) = metadata.about.as_deref().filter(|a| !a.trim().is_empty()) {
                p class="profile-about" { (linkified(about)) }
            }

            div class="profile-meta" {
                @if let Some(website) = metadata.website_url() {
                    a href=(website) rel="nofollow noopener" target="_blank" {
                        (truncate(website.strip_prefix("https://").or_else(|| website.strip_prefix("http://")).unwrap_or(website.as_str()), 40))
                    }
                }

                @if let Some(nip05) = metadata.nip05.as_deref().filter(|n| !n.is_empty()) {
                    span title="NIP-05" { (nip05) }
                }

                @if let Some(lightning) = metadata.lightning() {
                    span title="Lightning Address" {
                        (PreEscaped(ICON_LIGHTNING)) " " (truncate(lightning, 40))
                    }
                }
            }
        }
    }
}

/// Avatar with name and short npub on one line.
pub fn compact(event: &SampleEvent, _ctx: &RenderContext) -> Markup {
    let metadata = ProfileMetadata::from_json(&event.content);
    let name = metadata.display_name(Some(&event.pubkey));
    let picture = metadata.picture(&event.pubkey);

    html! {
        div class="profile-line" {
            (avatar(&picture.fallback_color, picture.url.as_deref(), &name, "md"))
            div {
                strong { (name) }
                br;
                a class="npub" href=(pubkey_uri(&event.pubkey)) { (short_npub(&event.pubkey)) }
            }
        }
    }
}
