//! NIP-19 entity helpers and NIP-21 `nostr:` URIs.

use std::fmt;

use nostr::nips::nip19::{FromBech32, ToBech32};
use nostr::{EventId, PublicKey};

/// What kind of identifier a string looks like.
///
/// Detection is by prefix only; a string classified as `Npub` is not
/// guaranteed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Npub,
    Nsec,
    Note,
    Nprofile,
    Nevent,
    Naddr,
    Nrelay,
    /// 64-character hex (pubkey or event id).
    Hex,
    Unknown,
}

impl EntityType {
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Npub => Some("npub"),
            Self::Nsec => Some("nsec"),
            Self::Note => Some("note"),
            Self::Nprofile => Some("nprofile"),
            Self::Nevent => Some("nevent"),
            Self::Naddr => Some("naddr"),
            Self::Nrelay => Some("nrelay"),
            Self::Hex | Self::Unknown => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => f.write_str("hex"),
            Self::Unknown => f.write_str("unknown"),
            other => f.write_str(other.prefix().unwrap_or_default()),
        }
    }
}

const PREFIXES: [EntityType; 7] = [
    EntityType::Npub,
    EntityType::Nsec,
    EntityType::Note,
    EntityType::Nprofile,
    EntityType::Nevent,
    EntityType::Naddr,
    EntityType::Nrelay,
];

/// True for exactly 64 hex characters (either case).
pub fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Classify an identifier string.
pub fn identify_entity(s: &str) -> EntityType {
    if is_hex64(s) {
        return EntityType::Hex;
    }

    PREFIXES
        .into_iter()
        .find(|t| t.prefix().is_some_and(|p| s.starts_with(p)))
        .unwrap_or(EntityType::Unknown)
}

/// Encode a hex pubkey as `npub1...`.
pub fn hex_to_npub(hex: &str) -> Option<String> {
    PublicKey::from_hex(hex).ok()?.to_bech32().ok()
}

/// Decode an `npub1...` to its hex pubkey.
pub fn npub_to_hex(npub: &str) -> Option<String> {
    PublicKey::from_bech32(npub).ok().map(|pk| pk.to_hex())
}

/// Encode a hex event id as `note1...`.
pub fn hex_to_note(hex: &str) -> Option<String> {
    EventId::from_hex(hex).ok()?.to_bech32().ok()
}

fn head(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(i, _)| &s[..i])
}

fn tail(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    s.char_indices().nth(count - n).map_or(s, |(i, _)| &s[i..])
}

/// Short display form of an identifier.
///
/// Hex and unrecognized strings longer than 10 characters become
/// `abcd:ef`. NIP-19 entities keep their prefix (unless `show_prefix` is
/// false) followed by the first two and last two characters of the body, e.g.
/// `npub1q:yz`.
pub fn shorten_entity(entity: &str, show_prefix: bool) -> String {
    let kind = identify_entity(entity);

    let Some(prefix) = kind.prefix() else {
        if kind == EntityType::Unknown && entity.chars().count() <= 10 {
            return entity.to_string();
        }
        return format!("{}:{}", head(entity, 4), tail(entity, 2));
    };

    let body = &entity[prefix.len()..];
    let shortened = format!("{}:{}", head(body, 2), tail(body, 2));
    if show_prefix {
        format!("{prefix}{shortened}")
    } else {
        shortened
    }
}

/// Shortened npub for a hex pubkey, or the shortened hex if encoding fails.
pub fn short_npub(pubkey_hex: &str) -> String {
    match hex_to_npub(pubkey_hex) {
        Some(npub) => shorten_entity(&npub, true),
        None => shorten_entity(pubkey_hex, true),
    }
}

/// `nostr:` URI for an entity. Already-prefixed input is returned unchanged.
pub fn nostr_uri(entity: &str) -> String {
    if entity.starts_with("nostr:") {
        entity.to_string()
    } else {
        format!("nostr:{entity}")
    }
}

/// `nostr:npub1...` for a hex pubkey; other input is wrapped as-is.
pub fn pubkey_uri(pubkey: &str) -> String {
    if is_hex64(pubkey)
        && let Some(npub) = hex_to_npub(pubkey)
    {
        return nostr_uri(&npub);
    }
    nostr_uri(pubkey)
}

/// `nostr:note1...` for a hex event id; other input is wrapped as-is.
pub fn event_uri(id: &str) -> String {
    if identify_entity(id) == EntityType::Hex
        && let Some(note) = hex_to_note(id)
    {
        return nostr_uri(&note);
    }
    nostr_uri(id)
}
