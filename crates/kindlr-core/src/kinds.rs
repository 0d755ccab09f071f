//! Kind registry: descriptors for known event kinds and their display variants.
//!
//! The registry is built once from a compiled-in table and then only read.
//! It is passed explicitly to whoever needs it; there is no global instance.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Descriptive metadata for one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindDescriptor {
    /// Kind number.
    pub kind: u16,
    /// Display name (e.g. "Short Text Note").
    pub name: &'static str,
    /// One-line summary shown on catalog cards.
    pub short_description: &'static str,
    /// Longer description shown on the kind page.
    pub description: &'static str,
    /// NIP document defining the kind (e.g. "01").
    pub nip: &'static str,
    /// nostrbook.dev reference page.
    pub kurl: &'static str,
    /// NIP document on GitHub.
    pub nurl: &'static str,
}

/// A named rendering style for a kind's specialized view.
///
/// The key set is closed: unknown keys are rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Full,
    Compact,
}

impl Variant {
    /// All known variants.
    pub const ALL: [Variant; 2] = [Variant::Full, Variant::Compact];

    /// URL/route key for this variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

/// The specialized variants available for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindVariantRegistration {
    kind: u16,
    variants: Vec<Variant>,
    default_variant: Option<Variant>,
}

impl KindVariantRegistration {
    /// Create a registration. `variants` order is display order.
    ///
    /// # Errors
    ///
    /// Fails if `variants` is empty or `default_variant` is not one of them.
    pub fn new(kind: u16, variants: Vec<Variant>, default_variant: Option<Variant>) -> Result<Self> {
        if variants.is_empty() {
            return Err(Error::EmptyVariants(kind));
        }
        if let Some(default) = default_variant
            && !variants.contains(&default)
        {
            return Err(Error::UndeclaredDefault {
                kind,
                variant: default.as_str(),
            });
        }
        Ok(Self {
            kind,
            variants,
            default_variant,
        })
    }

    pub fn kind(&self) -> u16 {
        self.kind
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn default_variant(&self) -> Option<Variant> {
        self.default_variant
    }
}

/// Lookup table from kind number to descriptor and variant registration.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    /// Descriptors sorted by kind number.
    descriptors: Vec<KindDescriptor>,
    index: HashMap<u16, usize>,
    registrations: HashMap<u16, KindVariantRegistration>,
}

impl KindRegistry {
    /// Build a registry from descriptors and variant registrations.
    ///
    /// # Errors
    ///
    /// Fails on duplicate kinds in either input.
    pub fn new(
        descriptors: impl IntoIterator<Item = KindDescriptor>,
        registrations: impl IntoIterator<Item = KindVariantRegistration>,
    ) -> Result<Self> {
        let mut descriptors: Vec<KindDescriptor> = descriptors.into_iter().collect();
        descriptors.sort_by_key(|d| d.kind);

        let mut index = HashMap::with_capacity(descriptors.len());
        for (i, d) in descriptors.iter().enumerate() {
            if index.insert(d.kind, i).is_some() {
                return Err(Error::DuplicateKind(d.kind));
            }
        }

        let mut by_kind = HashMap::new();
        for reg in registrations {
            let kind = reg.kind;
            if by_kind.insert(kind, reg).is_some() {
                return Err(Error::DuplicateRegistration(kind));
            }
        }

        tracing::debug!(
            kinds = descriptors.len(),
            registrations = by_kind.len(),
            "kind registry built"
        );

        Ok(Self {
            descriptors,
            index,
            registrations: by_kind,
        })
    }

    /// The compiled-in catalog with the built-in variant registrations.
    pub fn builtin() -> Result<Self> {
        Self::new(KIND_TABLE.iter().copied(), builtin_registrations()?)
    }

    /// Look up a kind. `None` is a normal outcome for unknown kinds.
    pub fn lookup(&self, kind: u16) -> Option<&KindDescriptor> {
        self.index.get(&kind).map(|&i| &self.descriptors[i])
    }

    /// All descriptors in ascending kind order.
    pub fn descriptors(&self) -> &[KindDescriptor] {
        &self.descriptors
    }

    pub fn has_variants(&self, kind: u16) -> bool {
        self.registrations.contains_key(&kind)
    }

    /// Declared variants for a kind, in display order (empty if none).
    pub fn list_variants(&self, kind: u16) -> &[Variant] {
        self.registrations
            .get(&kind)
            .map(|r| r.variants())
            .unwrap_or(&[])
    }

    pub fn default_variant(&self, kind: u16) -> Option<Variant> {
        self.registrations
            .get(&kind)
            .and_then(|r| r.default_variant())
    }

    /// Iterate over all variant registrations.
    pub fn registrations(&self) -> impl Iterator<Item = &KindVariantRegistration> {
        self.registrations.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Variant registrations for kinds with specialized renderers.
fn builtin_registrations() -> Result<Vec<KindVariantRegistration>> {
    use Variant::{Compact, Full};

    Ok(vec![
        KindVariantRegistration::new(0, vec![Full, Compact], Some(Full))?,
        KindVariantRegistration::new(1, vec![Full, Compact], Some(Compact))?,
        KindVariantRegistration::new(3, vec![Full, Compact], Some(Compact))?,
    ])
}

macro_rules! kind {
    ($kind:literal, $nip:literal, $name:literal, $short:literal, $desc:literal $(,)?) => {
        KindDescriptor {
            kind: $kind,
            name: $name,
            short_description: $short,
            description: $desc,
            nip: $nip,
            kurl: concat!("https://nostrbook.dev/kinds/", $kind),
            nurl: concat!("https://github.com/nostr-protocol/nips/blob/master/", $nip, ".md"),
        }
    };
}

/// Compiled-in kind catalog.
pub static KIND_TABLE: &[KindDescriptor] = &[
    kind!(
        0,
        "01",
        "User Metadata",
        "Profile information for a pubkey",
        "Stringified JSON object describing the user who created the event: name, about, picture and other profile fields."
    ),
    kind!(
        1,
        "10",
        "Short Text Note",
        "Plaintext notes, the basic unit of social posting",
        "A short plaintext note. Replies and threads are expressed with marked e tags; mentions use p tags."
    ),
    kind!(
        2,
        "01",
        "Recommend Relay",
        "Deprecated relay recommendation",
        "Deprecated event in which the content is the URL of a relay the author recommends."
    ),
    kind!(
        3,
        "02",
        "Follows",
        "List of followed profiles",
        "A follow list: one p tag per followed pubkey, optionally with a relay hint and petname."
    ),
    kind!(
        4,
        "04",
        "Encrypted Direct Messages",
        "Legacy encrypted direct messages",
        "Direct messages encrypted with a shared secret. Superseded by private direct messages (NIP-17)."
    ),
    kind!(
        5,
        "09",
        "Event Deletion Request",
        "Request to delete earlier events",
        "Lists e and a tags referencing events the author asks relays and clients to delete."
    ),
    kind!(
        6,
        "18",
        "Repost",
        "Repost of a short text note",
        "Signals that the author reposted a kind 1 note; the content may carry the stringified original."
    ),
    kind!(
        7,
        "25",
        "Reaction",
        "Like, dislike or emoji reaction",
        "A reaction to another event. Content is usually +, - or an emoji; e and p tags reference the target."
    ),
    kind!(
        8,
        "58",
        "Badge Award",
        "Award of a badge to one or more pubkeys",
        "References a badge definition through an a tag and lists awarded pubkeys in p tags."
    ),
    kind!(
        9,
        "C7",
        "Chat Message",
        "Message in a chat group",
        "A plain chat message, used by group chat clients together with relay-based groups."
    ),
    kind!(
        13,
        "59",
        "Seal",
        "Encrypted and signed rumor",
        "Wraps an unsigned event (rumor) encrypted to the recipient; itself wrapped in a gift wrap."
    ),
    kind!(
        14,
        "17",
        "Direct Message",
        "Private direct message (rumor)",
        "Unsigned chat message delivered inside a seal and gift wrap for private direct messaging."
    ),
    kind!(
        16,
        "18",
        "Generic Repost",
        "Repost of any event kind",
        "Repost of an event that is not a kind 1 note; a k tag names the reposted kind."
    ),
    kind!(
        20,
        "68",
        "Picture",
        "Picture-first post",
        "A post centred on one or more images described with imeta tags."
    ),
    kind!(
        40,
        "28",
        "Channel Creation",
        "Create a public chat channel",
        "Creates a public chat channel; content holds the channel metadata as JSON."
    ),
    kind!(
        41,
        "28",
        "Channel Metadata",
        "Update public chat channel metadata",
        "Updates the metadata of a public chat channel created with kind 40."
    ),
    kind!(
        42,
        "28",
        "Channel Message",
        "Message in a public chat channel",
        "A message posted to a public chat channel; the root e tag points at the channel creation event."
    ),
    kind!(
        1063,
        "94",
        "File Metadata",
        "Metadata describing a shared file",
        "Describes a file by URL, MIME type and hash so clients can display or verify it."
    ),
    kind!(
        1111,
        "22",
        "Comment",
        "Threaded comment on any content",
        "A comment scoped to a root event, address or external identifier using uppercase and lowercase tags."
    ),
    kind!(
        1311,
        "53",
        "Live Chat Message",
        "Chat message for a live activity",
        "A chat message attached to a live event through an a tag."
    ),
    kind!(
        1984,
        "56",
        "Reporting",
        "Report objectionable content or users",
        "Reports a user or an event, with the report type carried in the p or e tag."
    ),
    kind!(
        1985,
        "32",
        "Label",
        "Attach labels to events or pubkeys",
        "Applies labels from a namespace (L tag) to referenced events, pubkeys, relays or topics."
    ),
    kind!(
        9734,
        "57",
        "Zap Request",
        "Request a lightning zap invoice",
        "Signed request sent to a recipient's LNURL server describing the zap to be paid."
    ),
    kind!(
        9735,
        "57",
        "Zap",
        "Receipt of a paid lightning zap",
        "Published by the recipient's LNURL server once a zap invoice is paid; embeds the zap request."
    ),
    kind!(
        9802,
        "84",
        "Highlights",
        "Highlighted passage from content",
        "A highlighted excerpt with references to its source event or URL."
    ),
    kind!(
        10000,
        "51",
        "Mute List",
        "Things the user doesn't want to see",
        "Pubkeys, hashtags, words and threads the author wants hidden from their feeds."
    ),
    kind!(
        10002,
        "65",
        "Relay List Metadata",
        "Relays the user reads from and writes to",
        "One r tag per relay, optionally marked read or write, advertising where to find the author's events."
    ),
    kind!(
        10050,
        "17",
        "Relay List for DMs",
        "Relays preferred for receiving direct messages",
        "Lists the relays where the author wants to receive private direct messages."
    ),
    kind!(
        13194,
        "47",
        "Wallet Info",
        "Capabilities of a wallet service",
        "Published by a Nostr Wallet Connect service to advertise supported commands."
    ),
    kind!(
        22242,
        "42",
        "Client Authentication",
        "Authenticate a client to a relay",
        "Ephemeral event signed in response to a relay AUTH challenge."
    ),
    kind!(
        23194,
        "47",
        "Wallet Request",
        "Nostr Wallet Connect request",
        "Encrypted command sent from a client app to a wallet service."
    ),
    kind!(
        23195,
        "47",
        "Wallet Response",
        "Nostr Wallet Connect response",
        "Encrypted result returned by a wallet service to a client app."
    ),
    kind!(
        24133,
        "46",
        "Nostr Connect",
        "Remote signing request or response",
        "Encrypted messages exchanged between a client and a remote signer."
    ),
    kind!(
        27235,
        "98",
        "HTTP Auth",
        "Authenticate HTTP requests",
        "Ephemeral event carried in an Authorization header to prove the caller's pubkey."
    ),
    kind!(
        30000,
        "51",
        "Follow Sets",
        "Categorized groups of pubkeys",
        "Addressable lists of pubkeys grouped under a d tag identifier."
    ),
    kind!(
        30008,
        "58",
        "Profile Badges",
        "Badges a user chooses to display",
        "Ordered pairs of badge definitions and awards the author shows on their profile."
    ),
    kind!(
        30009,
        "58",
        "Badge Definition",
        "Definition of an awardable badge",
        "Describes a badge with name, description and image; referenced by badge awards."
    ),
    kind!(
        30023,
        "23",
        "Long-form Content",
        "Articles and blog posts",
        "Addressable Markdown article with title, summary, image and published_at tags."
    ),
    kind!(
        30311,
        "53",
        "Live Event",
        "Live streaming or activity",
        "Addressable description of a live activity with streaming URL, status and participants."
    ),
    kind!(
        31922,
        "52",
        "Date-Based Calendar Event",
        "All-day or multi-day calendar event",
        "Calendar event spanning whole days, with start and optional end dates."
    ),
    kind!(
        34235,
        "71",
        "Video Event",
        "Horizontal video post",
        "Video content described with imeta tags, title and duration."
    ),
    kind!(
        34550,
        "72",
        "Community Definition",
        "Moderated community",
        "Defines a moderated community with its moderators and relays."
    ),
];
