//! Word-level segments within a single line.
//!
//! Uses `similar`'s word tokenizer (words and whitespace runs). Consecutive
//! tokens with the same tag are grouped into one hunk, and every hunk
//! advances a single shared column cursor, so removed and added columns are
//! not tracked per side. Segments are only meant for highlighting.
//!
//! Changes that consist only of whitespace (re-indentation, doubled spaces)
//! produce no segment; they still advance the cursor.

use similar::{ChangeTag, TextDiff};

use crate::types::{ChangeSegment, DiffType};

/// Compute intra-line change segments between `left` and `right`.
pub fn word_segments(left: &str, right: &str, line_number: usize) -> Vec<ChangeSegment> {
    if left.is_empty() && !right.is_empty() {
        return vec![ChangeSegment::new(DiffType::Added, right, line_number, 1)];
    }
    if right.is_empty() && !left.is_empty() {
        return vec![ChangeSegment::new(DiffType::Removed, left, line_number, 1)];
    }
    if left == right {
        return Vec::new();
    }

    let diff = TextDiff::from_words(left, right);
    let mut segments = Vec::new();
    let mut column = 1usize;

    for (tag, value) in word_hunks(&diff) {
        if value.trim().is_empty() {
            column += value.chars().count();
            continue;
        }
        match tag {
            ChangeTag::Insert => {
                segments.push(ChangeSegment::new(DiffType::Added, &value, line_number, column));
            }
            ChangeTag::Delete => {
                segments.push(ChangeSegment::new(DiffType::Removed, &value, line_number, column));
            }
            ChangeTag::Equal => {}
        }
        column += value.chars().count();
    }

    segments
}

/// Group the token stream into maximal runs of one tag.
fn word_hunks(diff: &TextDiff<'_, '_, '_, str>) -> Vec<(ChangeTag, String)> {
    let mut hunks: Vec<(ChangeTag, String)> = Vec::new();

    for op in diff.ops() {
        for change in diff.iter_changes(op) {
            match hunks.last_mut() {
                Some((tag, value)) if *tag == change.tag() => value.push_str(change.value()),
                _ => hunks.push((change.tag(), change.value().to_string())),
            }
        }
    }

    hunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_left_is_whole_line_addition() {
        let segs = word_segments("", "brand new", 7);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].segment_type, DiffType::Added);
        assert_eq!(segs[0].value, "brand new");
        assert_eq!(segs[0].line_number, 7);
        assert_eq!(segs[0].start_column, 1);
        assert_eq!(segs[0].end_column, 10);
    }

    #[test]
    fn empty_right_is_whole_line_removal() {
        let segs = word_segments("gone", "", 2);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].segment_type, DiffType::Removed);
        assert_eq!(segs[0].start_column, 1);
        assert_eq!(segs[0].end_column, 5);
    }

    #[test]
    fn equal_lines_have_no_segments() {
        assert!(word_segments("same", "same", 1).is_empty());
        assert!(word_segments("", "", 1).is_empty());
    }

    #[test]
    fn single_word_replacement() {
        let segs = word_segments("cat", "dog", 1);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].segment_type, DiffType::Removed);
        assert_eq!(segs[0].value, "cat");
        assert_eq!((segs[0].start_column, segs[0].end_column), (1, 4));
        // The cursor is shared, so the addition starts after the removal.
        assert_eq!(segs[1].segment_type, DiffType::Added);
        assert_eq!(segs[1].value, "dog");
        assert_eq!((segs[1].start_column, segs[1].end_column), (4, 7));
    }

    #[test]
    fn unchanged_prefix_offsets_first_segment() {
        let segs = word_segments("hello cat", "hello dog", 3);
        let prefix = "hello ".chars().count();
        assert_eq!(segs[0].start_column, prefix + 1);
        assert_eq!(segs[0].value, "cat");
        assert!(segs.iter().all(|s| s.line_number == 3));
    }

    #[test]
    fn segments_are_ordered_and_disjoint() {
        let segs = word_segments("the quick brown fox", "the slow brown cat", 1);
        assert!(!segs.is_empty());
        for pair in segs.windows(2) {
            assert!(pair[0].end_column <= pair[1].start_column);
        }
    }

    #[test]
    fn whitespace_only_changes_have_no_segments() {
        assert!(word_segments("  \"uid\": 1,", "    \"uid\": 1,", 4).is_empty());
        assert!(word_segments("a  b", "a b", 1).is_empty());
    }

    #[test]
    fn whitespace_change_still_advances_column() {
        let segs = word_segments("a  b cat", "a b dog", 1);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].value, "cat");
        assert_eq!(segs[0].start_column, "a  b ".chars().count() + " ".chars().count() + 1);
        assert_eq!(segs[1].value, "dog");
    }

    #[test]
    fn multibyte_columns_count_chars() {
        let segs = word_segments("naïve café", "naïve bar", 1);
        assert_eq!(segs[0].start_column, "naïve ".chars().count() + 1);
        assert_eq!(segs[0].value, "café");
        assert_eq!(segs[0].end_column, segs[0].start_column + 4);
    }
}
