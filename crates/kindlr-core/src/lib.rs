//! Core types and logic for Kindlr, a browser for Nostr event kinds.
//!
//! This crate provides:
//! - The kind catalog (descriptors and specialized view variants)
//! - Search query parsing and kind/event filtering
//! - View dispatch from `(kind, variant)` to a renderer
//! - Entity formatting helpers (NIP-19, colors, relative time, links)
//! - Prometheus metrics helpers
//! - Shared error types

mod error;
mod event;

pub mod color;
pub mod dispatch;
pub mod filter;
pub mod json;
pub mod kinds;
pub mod links;
pub mod metrics;
pub mod nip19;
pub mod profile;
pub mod search;
pub mod tags;
pub mod time;

pub use dispatch::{Dispatch, ViewTable};
pub use error::{Error, Result};
pub use event::{SampleEvent, parse_event_unverified, validate_event};
pub use filter::{filter_catalog, filter_event, filter_kind, has_matching_events};
pub use kinds::{KIND_TABLE, KindDescriptor, KindRegistry, KindVariantRegistration, Variant};
pub use search::{SearchCriteria, parse_search_query};
