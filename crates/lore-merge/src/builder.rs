//! Reconstruct merged text from a diff and a decision store.
//!
//! Per-type defaults when no decision exists:
//!
//! | type      | no decision | accept left | accept right | rejected |
//! |-----------|-------------|-------------|--------------|----------|
//! | unchanged | left        | -           | -            | -        |
//! | added     | right       | nothing     | right        | nothing  |
//! | removed   | left        | left        | nothing      | nothing  |
//! | modified  | left        | left        | right        | left     |
//!
//! Additions are applied until rejected; removals are not applied until
//! accepted; modifications keep the left (base) line until the right side is
//! explicitly accepted.

use lore_diff::{DiffResult, DiffType, LineRecord};

use crate::decision::{MergeDecision, Side};
use crate::identity::SegmentIdentity;
use crate::store::DecisionStore;

/// Build the merged document. Emitted lines are joined with `\n`.
///
/// The two source texts are not taken as arguments: every [`LineRecord`]
/// already carries its left and right content, so the diff is the only
/// document input.
pub fn build_merged(diff: &DiffResult, decisions: &DecisionStore) -> String {
    diff.lines
        .iter()
        .filter_map(|record| {
            let decision = decisions.get(&SegmentIdentity::of(record));
            resolve_line(record, decision)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The line a single record contributes to the merge, if any.
pub fn resolve_line<'a>(record: &'a LineRecord, decision: Option<&MergeDecision>) -> Option<&'a str> {
    let left = record.left_content.as_str();
    let right = record.right_content.as_str();

    match (record.diff_type, decision) {
        (DiffType::Unchanged, _) => Some(left),

        (DiffType::Added, None) => Some(right),
        (DiffType::Added, Some(d)) if d.accepts(Side::Right) => Some(right),
        (DiffType::Added, Some(_)) => None,

        (DiffType::Removed, None) => Some(left),
        (DiffType::Removed, Some(d)) if d.accepts(Side::Left) => Some(left),
        (DiffType::Removed, Some(_)) => None,

        (DiffType::Modified, Some(d)) if d.accepts(Side::Right) => Some(right),
        (DiffType::Modified, _) => Some(left),
    }
}
