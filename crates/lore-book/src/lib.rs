//! Lorebook document model.
//!
//! A lorebook is a JSON object whose `entries` object maps UID strings to
//! entries with trigger keys, text content, and behaviour flags. This crate
//! validates such documents, reads typed entries, applies structural edits
//! on the serialized text, and derives narrative and markdown views.
//!
//! # Modules
//!
//! - [`error`] — Error types for document operations
//! - [`json`] — Validate, format, and minify raw JSON text
//! - [`entry`] — [`LorebookEntry`], the typed entry view
//! - [`document`] — [`Lorebook`] plus text-level entry edits
//! - [`narrative`] — Narrative extraction and markdown export

pub mod document;
pub mod entry;
pub mod error;
pub mod json;
pub mod narrative;

pub use document::{extract_entries, remove_entry, update_entry, Lorebook, DEFAULT_INDENT};
pub use entry::LorebookEntry;
pub use error::{BookError, Result};
pub use json::{format_json, minify_json, to_string_indented, validate_json};
pub use narrative::{extract_narrative, narrative_markdown, NarrativeEntry};
