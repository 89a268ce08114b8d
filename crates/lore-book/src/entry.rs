use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view of one lorebook entry.
///
/// Only the fields the tool reads are named; every other field (behaviour
/// flags, recursion and scoring settings, character filters, ...) is kept in
/// `extra` so a round trip does not lose data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorebookEntry {
    pub uid: u64,
    #[serde(default)]
    pub key: Vec<String>,
    #[serde(default)]
    pub keysecondary: Vec<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub selective: bool,
    #[serde(default)]
    pub disable: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_index: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LorebookEntry {
    /// Text matched by outline search: comment, keys, and content.
    pub fn searchable_text(&self) -> String {
        format!("{}\n{}\n{}", self.comment, self.key.join(" "), self.content)
    }

    /// Case-insensitive substring match; a blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.searchable_text()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// First `max_chars` characters of the content, with an ellipsis when cut.
    pub fn content_preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let cut: String = self.content.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
