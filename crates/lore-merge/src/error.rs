//! Error types for the merge crate.

use thiserror::Error;

/// Errors from the fallible edges of the merge engine.
///
/// Building a merge and recording decisions never fail; only parsing
/// identities and reading or writing decision files can.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A segment identity string was not of the form `<line>-<type>`.
    #[error("invalid segment identity {input:?}: {reason}")]
    InvalidIdentity { input: String, reason: String },

    /// A side name was neither `left` nor `right`.
    #[error("invalid side {0:?}: expected \"left\" or \"right\"")]
    InvalidSide(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading or writing a decision file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for merge results.
pub type Result<T> = std::result::Result<T, MergeError>;
