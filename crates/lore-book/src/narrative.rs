//! Narrative view: only the uid, comment, and content of each entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{Lorebook, DEFAULT_INDENT};
use crate::error::{BookError, Result};
use crate::json::{to_string_indented, validate_json};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    pub uid: u64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub content: String,
}

impl NarrativeEntry {
    /// Markdown rendering: `# Entry <uid> - <comment>` followed by the content.
    pub fn to_markdown(&self) -> String {
        format!("# Entry {} - {}\n\n{}", self.uid, self.comment, self.content)
    }
}

/// Reduce a lorebook to its narrative fields, keeping the `{"entries": ...}`
/// shape and entry order.
pub fn extract_narrative(text: &str) -> Result<String> {
    let book = Lorebook::parse(text)?;
    let mut entries = Map::new();
    for (uid, entry) in book.entries()? {
        let narrative = NarrativeEntry {
            uid: entry.uid,
            comment: entry.comment,
            content: entry.content,
        };
        let value = serde_json::to_value(narrative).map_err(|e| BookError::Serialization(e.to_string()))?;
        entries.insert(uid, value);
    }

    let mut root = Map::new();
    root.insert("entries".to_string(), Value::Object(entries));
    to_string_indented(&root, DEFAULT_INDENT)
}

/// Render every entry of a narrative document as markdown, keyed by uid.
pub fn narrative_markdown(narrative_text: &str) -> Result<BTreeMap<u64, String>> {
    let value = validate_json(narrative_text)?;
    let entries = value
        .get("entries")
        .and_then(Value::as_object)
        .ok_or(BookError::NotALorebook)?;

    let mut files = BTreeMap::new();
    for (uid, raw) in entries {
        let entry = NarrativeEntry::deserialize(raw).map_err(|e| BookError::InvalidEntry {
            uid: uid.clone(),
            reason: e.to_string(),
        })?;
        files.insert(entry.uid, entry.to_markdown());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r#"{"entries": {
        "7": {"uid": 7, "key": ["a"], "comment": "Alpha", "content": "First.", "constant": true},
        "3": {"uid": 3, "key": ["b"], "comment": "Beta", "content": "Second.", "order": 100}
    }}"#;

    #[test]
    fn narrative_keeps_only_three_fields() {
        let narrative = extract_narrative(BOOK).unwrap();
        let value: Value = serde_json::from_str(&narrative).unwrap();
        let alpha = value["entries"]["7"].as_object().unwrap();
        assert_eq!(alpha.len(), 3);
        assert_eq!(alpha["comment"], "Alpha");
        assert!(value["entries"]["3"].get("order").is_none());
    }

    #[test]
    fn narrative_preserves_entry_order() {
        let narrative = extract_narrative(BOOK).unwrap();
        let value: Value = serde_json::from_str(&narrative).unwrap();
        let keys: Vec<&String> = value["entries"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["7", "3"]);
    }

    #[test]
    fn narrative_of_invalid_document_fails() {
        assert!(matches!(extract_narrative("{}"), Err(BookError::NotALorebook)));
    }

    #[test]
    fn markdown_per_entry() {
        let files = narrative_markdown(&extract_narrative(BOOK).unwrap()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[&7], "# Entry 7 - Alpha\n\nFirst.");
        assert_eq!(files[&3], "# Entry 3 - Beta\n\nSecond.");
    }

    #[test]
    fn markdown_tolerates_missing_comment() {
        let files = narrative_markdown(r#"{"entries": {"1": {"uid": 1, "content": "x"}}}"#).unwrap();
        assert_eq!(files[&1], "# Entry 1 - \n\nx");
    }

    #[test]
    fn markdown_requires_entries_object() {
        assert!(narrative_markdown(r#"{"items": {}}"#).is_err());
        assert!(matches!(narrative_markdown("nope"), Err(BookError::InvalidJson(_))));
    }
}
