//! Path segment decoding: kind numbers, variant keys and event ids.

use nostr::EventId;
use nostr::nips::nip19::{FromBech32, Nip19};

use crate::error::WebError;

/// Parse a kind number path segment.
pub fn parse_kind(segment: &str) -> Result<u16, WebError> {
    segment
        .parse::<u16>()
        .map_err(|_| WebError::InvalidIdentifier(format!("'{segment}' is not a kind number")))
}

/// Decode an event id given as 64-char hex, `note1...` or `nevent1...`.
///
/// Returns lowercase hex.
pub fn parse_event_id(identifier: &str) -> Result<String, WebError> {
    let identifier = identifier.strip_prefix("nostr:").unwrap_or(identifier);

    if let Ok(nip19) = Nip19::from_bech32(identifier) {
        return match nip19 {
            Nip19::EventId(id) => Ok(id.to_hex()),
            Nip19::Event(event) => Ok(event.event_id.to_hex()),
            _ => Err(WebError::InvalidIdentifier(format!(
                "'{identifier}' does not identify an event"
            ))),
        };
    }

    EventId::from_hex(identifier)
        .map(|id| id.to_hex())
        .map_err(|_| {
            WebError::InvalidIdentifier(format!(
                "'{identifier}' is not a hex event id, note or nevent"
            ))
        })
}
