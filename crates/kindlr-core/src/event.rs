//! Sample event model and validation.
//!
//! Sample events are consumed read-only by the filter evaluator and the
//! renderers. They are produced either from a verified `nostr::Event` or by
//! parsing raw JSON (optionally skipping ID/signature verification).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use nostr::JsonUtil; // Required for Event::from_json()

/// A Nostr event as seen by the catalog: flat strings, no crypto types.
///
/// Missing `content` or `tags` in raw JSON deserialize to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEvent {
    /// Event ID (64-char hex).
    pub id: String,
    /// Author public key (64-char hex).
    pub pubkey: String,
    /// Creation time (unix seconds).
    pub created_at: u64,
    /// Event kind.
    pub kind: u16,
    /// Ordered tag list.
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    /// Event content.
    #[serde(default)]
    pub content: String,
    /// Schnorr signature (128-char hex).
    pub sig: String,
}

impl SampleEvent {
    /// Pretty-printed JSON used by the raw JSON views.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Iterate over tags whose first element equals `name`.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Vec<String>> + 'a {
        self.tags
            .iter()
            .filter(move |t| t.first().is_some_and(|n| n == name))
    }
}

impl From<&nostr::Event> for SampleEvent {
    fn from(event: &nostr::Event) -> Self {
        Self {
            id: event.id.to_hex(),
            pubkey: event.pubkey.to_hex(),
            created_at: event.created_at.as_secs(),
            kind: event.kind.as_u16(),
            tags: event
                .tags
                .iter()
                .map(|tag| tag.as_slice().iter().map(|s| s.to_string()).collect())
                .collect(),
            content: event.content.clone(),
            sig: event.sig.to_string(),
        }
    }
}

impl From<nostr::Event> for SampleEvent {
    fn from(event: nostr::Event) -> Self {
        Self::from(&event)
    }
}

/// Parse and fully verify a raw event (ID hash and Schnorr signature).
///
/// # Errors
///
/// Returns an error if JSON parsing fails, the ID doesn't match the computed
/// hash, or the signature is invalid.
pub fn validate_event(event_json: &str) -> Result<SampleEvent> {
    let event = nostr::Event::from_json(event_json)?;
    event.verify()?;
    Ok(SampleEvent::from(&event))
}

/// Parse a raw event without cryptographic verification.
///
/// Only the shape of the hex fields is checked.
pub fn parse_event_unverified(event_json: &str) -> Result<SampleEvent> {
    let event: SampleEvent = serde_json::from_str(event_json)?;
    check_hex_field("id", &event.id, 64)?;
    check_hex_field("pubkey", &event.pubkey, 64)?;
    check_hex_field("sig", &event.sig, 128)?;
    Ok(event)
}

fn check_hex_field(field: &'static str, value: &str, len: usize) -> Result<()> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidField {
            field,
            reason: format!("expected {len} hex characters"),
        });
    }
    Ok(())
}
