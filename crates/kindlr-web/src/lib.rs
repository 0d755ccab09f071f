//! Kindlr web: a server-rendered browser for Nostr event kinds.
//!
//! Every known kind is listed with its NIP references and a live sample
//! event. The catalog is searchable with a small query language (see
//! [`kindlr_core::parse_search_query`]), and each sample is shown through
//! the kind's specialized views, the generic field view and raw JSON.
//!
//! # Architecture
//!
//! - **Source**: Sample events from relays (nostr-sdk) or a JSONL fixture
//! - **Cache**: Samples per kind in a moka cache with a TTL
//! - **Render**: Server-side HTML with maud, dispatched per `(kind, variant)`
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - URLs are validated (HTTPS/HTTP only) before use in attributes
//! - Strict Content-Security-Policy: no JavaScript execution
//! - X-Frame-Options: DENY everywhere except embed views

pub mod cache;
pub mod config;
pub mod error;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod source;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use source::{EventSource, JsonlSource, RelaySource};
pub use state::AppState;
