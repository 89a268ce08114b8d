//! Error types for lorebook document operations.

use thiserror::Error;

/// Errors that can occur while reading or editing a lorebook.
#[derive(Debug, Error)]
pub enum BookError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Valid JSON, but not an object with an `entries` object.
    #[error("not a lorebook: expected an object with an \"entries\" object")]
    NotALorebook,

    /// No entry is stored under this UID.
    #[error("entry not found: {uid}")]
    EntryNotFound { uid: String },

    /// The entry exists but does not match the entry schema.
    #[error("invalid entry {uid}: {reason}")]
    InvalidEntry { uid: String, reason: String },

    /// An edit patch was not a JSON object.
    #[error("patch must be a JSON object")]
    InvalidPatch,

    /// Serialization error while writing a document.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for lorebook results.
pub type Result<T> = std::result::Result<T, BookError>;
