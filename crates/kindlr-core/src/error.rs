//! Error types for the Kindlr catalog core.
//!
//! Query parsing and filtering are total functions and never produce these
//! errors; they only arise when building registries or validating raw events.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing the catalog or reading events.
#[derive(Error, Debug)]
pub enum Error {
    /// Two descriptors in the catalog table share a kind number.
    #[error("duplicate kind descriptor for kind {0}")]
    DuplicateKind(u16),

    /// A variant registration was supplied twice for the same kind.
    #[error("duplicate variant registration for kind {0}")]
    DuplicateRegistration(u16),

    /// A variant registration declares no variants at all.
    #[error("variant registration for kind {0} declares no variants")]
    EmptyVariants(u16),

    /// The default variant is not one of the declared variants.
    #[error("default variant '{variant}' is not declared for kind {kind}")]
    UndeclaredDefault {
        /// Kind the registration belongs to.
        kind: u16,
        /// The offending default variant key.
        variant: &'static str,
    },

    /// A variant was declared but no renderer was supplied for it.
    #[error("no renderer registered for kind {kind} variant '{variant}'")]
    MissingRenderer {
        /// Kind the variant belongs to.
        kind: u16,
        /// The variant key without a renderer.
        variant: &'static str,
    },

    /// A variant key string is not one of the known variants.
    #[error("unknown variant key: {0}")]
    UnknownVariant(String),

    /// Event has an invalid field format (e.g., wrong hex length).
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// The name of the invalid field.
        field: &'static str,
        /// Description of what's wrong.
        reason: String,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nostr library error (event parsing, ID or signature verification).
    #[error("nostr error: {0}")]
    Nostr(#[from] nostr::event::Error),
}
