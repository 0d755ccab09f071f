//! Link detection in free text: web URLs, `nostr:` URIs and bare NIP-19
//! entities.

use std::sync::LazyLock;

use regex::Regex;

static HTTP_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?[-a-z0-9@:%._+~#=]{1,256}\.[a-z0-9()]{1,6}\b(?:[-a-z0-9()@:%_+.~#?&/=]*)",
    )
    .expect("url regex should compile")
});

static NOSTR_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)nostr:(?:npub|nsec|note|nprofile|nevent|naddr|nrelay)1[a-z0-9]+")
        .expect("nostr uri regex should compile")
});

static NIP19_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:npub|nsec|note|nprofile|nevent|naddr|nrelay)1[a-z0-9]+\b")
        .expect("nip19 entity regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Web URL. The href gets `https://` when the text has no scheme.
    Http,
    /// A `nostr:` URI, linked as written.
    NostrUri,
    /// A bare NIP-19 entity, linked as `nostr:<entity>`.
    Entity,
}

/// A piece of linkified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment<'a> {
    Text(&'a str),
    Link {
        kind: LinkKind,
        href: String,
        text: &'a str,
    },
}

struct Found {
    kind: LinkKind,
    start: usize,
    end: usize,
}

/// Split text into plain runs and links, in order.
///
/// Entities that sit inside a `nostr:` URI are not matched again. When
/// matches overlap, the one starting first wins.
pub fn linkify(text: &str) -> Vec<TextSegment<'_>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<Found> = HTTP_URL_RE
        .find_iter(text)
        .map(|m| Found {
            kind: LinkKind::Http,
            start: m.start(),
            end: m.end(),
        })
        .collect();

    let uris: Vec<(usize, usize)> = NOSTR_URI_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    for m in NIP19_ENTITY_RE.find_iter(text) {
        let inside_uri = uris
            .iter()
            .any(|&(start, end)| m.start() >= start && m.end() <= end);
        if !inside_uri {
            found.push(Found {
                kind: LinkKind::Entity,
                start: m.start(),
                end: m.end(),
            });
        }
    }

    found.extend(uris.into_iter().map(|(start, end)| Found {
        kind: LinkKind::NostrUri,
        start,
        end,
    }));

    // URIs sort ahead of URLs that start at the same offset
    found.sort_by_key(|f| (f.start, f.kind != LinkKind::NostrUri));

    let mut segments = Vec::new();
    let mut last = 0;

    for f in found {
        if f.start < last {
            continue;
        }
        if f.start > last {
            segments.push(TextSegment::Text(&text[last..f.start]));
        }

        let matched = &text[f.start..f.end];
        let href = match f.kind {
            LinkKind::Http if matched.to_ascii_lowercase().starts_with("http") => {
                matched.to_string()
            }
            LinkKind::Http => format!("https://{matched}"),
            LinkKind::NostrUri => matched.to_string(),
            LinkKind::Entity => format!("nostr:{matched}"),
        };

        segments.push(TextSegment::Link {
            kind: f.kind,
            href,
            text: matched,
        });
        last = f.end;
    }

    if last < text.len() {
        segments.push(TextSegment::Text(&text[last..]));
    }

    segments
}
