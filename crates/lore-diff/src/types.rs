//! Diff data model: line records, change segments, and the aggregate result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a line record or a change segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    /// Present only in the right document.
    Added,
    /// Present only in the left document.
    Removed,
    /// A removed line immediately followed by an added line.
    Modified,
    /// Present in both documents.
    Unchanged,
}

impl DiffType {
    /// The lowercase name used in identities and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
        }
    }

    /// Parse the lowercase name back into a `DiffType`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "added" => Some(Self::Added),
            "removed" => Some(Self::Removed),
            "modified" => Some(Self::Modified),
            "unchanged" => Some(Self::Unchanged),
            _ => None,
        }
    }

    /// Returns `true` for every type except `Unchanged`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-line span of changed text, used for highlighting only.
///
/// Columns are 1-based and measured in `char`s; `end_column` points one past
/// the last character of `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSegment {
    #[serde(rename = "type")]
    pub segment_type: DiffType,
    pub value: String,
    pub line_number: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl ChangeSegment {
    pub(crate) fn new(segment_type: DiffType, value: &str, line_number: usize, start_column: usize) -> Self {
        Self {
            segment_type,
            value: value.to_string(),
            line_number,
            start_column,
            end_column: start_column + value.chars().count(),
        }
    }

    /// Width of the span in columns.
    pub fn width(&self) -> usize {
        self.end_column - self.start_column
    }
}

/// One row of the diff.
///
/// `line_number` is a right-document position for `Added` records and a
/// left-document position for everything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub line_number: usize,
    pub left_content: String,
    pub right_content: String,
    pub diff_type: DiffType,
    pub segments: Vec<ChangeSegment>,
}

impl LineRecord {
    pub(crate) fn unchanged(line_number: usize, content: &str) -> Self {
        Self {
            line_number,
            left_content: content.to_string(),
            right_content: content.to_string(),
            diff_type: DiffType::Unchanged,
            segments: Vec::new(),
        }
    }

    pub(crate) fn added(line_number: usize, content: &str) -> Self {
        Self {
            line_number,
            left_content: String::new(),
            right_content: content.to_string(),
            diff_type: DiffType::Added,
            segments: crate::word::word_segments("", content, line_number),
        }
    }

    pub(crate) fn removed(line_number: usize, content: &str) -> Self {
        Self {
            line_number,
            left_content: content.to_string(),
            right_content: String::new(),
            diff_type: DiffType::Removed,
            segments: crate::word::word_segments(content, "", line_number),
        }
    }

    /// Returns `true` unless the record is `Unchanged`.
    pub fn is_change(&self) -> bool {
        self.diff_type.is_change()
    }
}

/// The full result of diffing two documents.
///
/// `total_changes` counts per-line events at classification time and is not
/// adjusted when removed/added pairs are collapsed into modifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub lines: Vec<LineRecord>,
    pub total_changes: usize,
    pub additions: usize,
    pub deletions: usize,
    pub modifications: usize,
}

impl DiffResult {
    /// Create an empty diff result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if every record is unchanged.
    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|l| !l.is_change())
    }

    /// Iterate over the records that carry a change.
    pub fn changes(&self) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter().filter(|l| l.is_change())
    }

    /// Number of records of the given type currently in `lines`.
    pub fn count(&self, diff_type: DiffType) -> usize {
        self.lines.iter().filter(|l| l.diff_type == diff_type).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_type_names_roundtrip() {
        for t in [DiffType::Added, DiffType::Removed, DiffType::Modified, DiffType::Unchanged] {
            assert_eq!(DiffType::from_name(t.as_str()), Some(t));
        }
        assert_eq!(DiffType::from_name("renamed"), None);
    }

    #[test]
    fn segment_end_column_counts_chars() {
        let seg = ChangeSegment::new(DiffType::Added, "héllo", 3, 5);
        assert_eq!(seg.end_column, 10);
        assert_eq!(seg.width(), 5);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let record = LineRecord::added(4, "new");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["lineNumber"], 4);
        assert_eq!(json["diffType"], "added");
        assert_eq!(json["rightContent"], "new");
        assert_eq!(json["segments"][0]["type"], "added");
        assert_eq!(json["segments"][0]["endColumn"], 4);
    }
}
