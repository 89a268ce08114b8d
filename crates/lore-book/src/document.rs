//! The lorebook document: a JSON object whose `entries` object maps UID
//! strings to entry objects.
//!
//! Edits work on the untyped JSON tree so field order and unknown fields are
//! preserved; typed [`LorebookEntry`] views are produced on read.

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::entry::LorebookEntry;
use crate::error::{BookError, Result};
use crate::json::{to_string_indented, validate_json};

/// Indentation used when an edit re-serializes a document.
pub const DEFAULT_INDENT: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Lorebook {
    /// Top-level fields; the `entries` slot holds `null` and is refilled on output.
    root: Map<String, Value>,
    entries: Map<String, Value>,
}

impl Lorebook {
    /// Parse and validate a lorebook document.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(validate_json(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(BookError::NotALorebook);
        };
        match root.get_mut("entries").map(Value::take) {
            Some(Value::Object(entries)) => Ok(Self { root, entries }),
            _ => Err(BookError::NotALorebook),
        }
    }

    /// `true` when `text` parses as a lorebook.
    pub fn is_lorebook(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entry UIDs in document order.
    pub fn uids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The raw JSON object stored under `uid`.
    pub fn raw_entry(&self, uid: &str) -> Option<&Value> {
        self.entries.get(uid)
    }

    /// Typed view of the entry stored under `uid`.
    pub fn entry(&self, uid: &str) -> Result<LorebookEntry> {
        let raw = self.raw_entry(uid).ok_or_else(|| BookError::EntryNotFound {
            uid: uid.to_string(),
        })?;
        typed_entry(uid, raw)
    }

    /// All entries in document order.
    pub fn entries(&self) -> Result<Vec<(String, LorebookEntry)>> {
        self.entries
            .iter()
            .map(|(uid, raw)| Ok((uid.clone(), typed_entry(uid, raw)?)))
            .collect()
    }

    /// Entries sorted for display and filtered by `query`.
    ///
    /// Entries with a `displayIndex` come first in index order, the rest
    /// follow by numeric UID.
    pub fn outline(&self, query: &str) -> Result<Vec<(String, LorebookEntry)>> {
        let mut entries = self.entries()?;
        entries.retain(|(_, entry)| entry.matches(query));
        entries.sort_by(|(_, a), (_, b)| outline_order(a, b));
        Ok(entries)
    }

    /// Remove the entry under `uid`, returning its JSON.
    pub fn remove_entry(&mut self, uid: &str) -> Result<Value> {
        let removed = self
            .entries
            .shift_remove(uid)
            .ok_or_else(|| BookError::EntryNotFound {
                uid: uid.to_string(),
            })?;
        debug!(uid, "removed entry");
        Ok(removed)
    }

    /// Shallow-merge `patch` over the entry under `uid`.
    pub fn update_entry(&mut self, uid: &str, patch: &Map<String, Value>) -> Result<()> {
        let entry = self
            .entries
            .get_mut(uid)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| BookError::EntryNotFound {
                uid: uid.to_string(),
            })?;
        for (field, value) in patch {
            entry.insert(field.clone(), value.clone());
        }
        debug!(uid, fields = patch.len(), "updated entry");
        Ok(())
    }

    /// Replace the entry under `uid` wholesale.
    pub fn replace_entry(&mut self, uid: &str, entry: &LorebookEntry) -> Result<()> {
        let value = serde_json::to_value(entry).map_err(|e| BookError::Serialization(e.to_string()))?;
        let slot = self
            .entries
            .get_mut(uid)
            .ok_or_else(|| BookError::EntryNotFound {
                uid: uid.to_string(),
            })?;
        *slot = value;
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        let mut root = self.root.clone();
        root.insert("entries".to_string(), Value::Object(self.entries.clone()));
        Value::Object(root)
    }

    pub fn to_string_indented(&self, indent: usize) -> Result<String> {
        to_string_indented(&self.to_value(), indent)
    }
}

fn typed_entry(uid: &str, raw: &Value) -> Result<LorebookEntry> {
    LorebookEntry::deserialize(raw).map_err(|e| BookError::InvalidEntry {
        uid: uid.to_string(),
        reason: e.to_string(),
    })
}

fn outline_order(a: &LorebookEntry, b: &LorebookEntry) -> Ordering {
    match (a.display_index, b.display_index) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.uid.cmp(&b.uid)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.uid.cmp(&b.uid),
    }
}

// ---- Text-level edits ----

/// Remove an entry from a lorebook document given as text.
pub fn remove_entry(text: &str, uid: &str) -> Result<String> {
    let mut book = Lorebook::parse(text)?;
    book.remove_entry(uid)?;
    book.to_string_indented(DEFAULT_INDENT)
}

/// Shallow-merge a JSON object patch over one entry of a document given as text.
pub fn update_entry(text: &str, uid: &str, patch: &Value) -> Result<String> {
    let patch = patch.as_object().ok_or(BookError::InvalidPatch)?;
    let mut book = Lorebook::parse(text)?;
    book.update_entry(uid, patch)?;
    book.to_string_indented(DEFAULT_INDENT)
}

/// Extract the entries of a document given as text.
pub fn extract_entries(text: &str) -> Result<Vec<(String, LorebookEntry)>> {
    Lorebook::parse(text)?.entries()
}
