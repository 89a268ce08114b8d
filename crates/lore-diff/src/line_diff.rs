//! Line-level diff: classify every line of two documents.
//!
//! Documents are split on `\n` (a trailing `\r` stays part of the line) and
//! a single trailing empty line produced by a final newline is dropped. The
//! line slices are diffed with `similar`, then the resulting hunks are walked
//! with independent left and right line counters.

use similar::{capture_diff_slices, DiffTag};
use tracing::debug;

use crate::collapse::collapse_modifications;
use crate::options::DiffOptions;
use crate::types::{DiffResult, LineRecord};

/// Diff two documents with default options.
pub fn diff_lines(left: &str, right: &str) -> DiffResult {
    diff_lines_with(left, right, &DiffOptions::default())
}

/// Diff two documents: raw per-hunk records followed by the collapse pass.
pub fn diff_lines_with(left: &str, right: &str, options: &DiffOptions) -> DiffResult {
    let mut result = raw_line_records(left, right, options);
    collapse_modifications(&mut result);

    debug!(
        lines = result.lines.len(),
        additions = result.additions,
        deletions = result.deletions,
        modifications = result.modifications,
        total_changes = result.total_changes,
        "computed line diff"
    );

    result
}

/// Split a document into lines, dropping one trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// First pass only: one record per line, no `Modified` records.
///
/// Blank lines inside unchanged hunks are skipped but still advance both
/// line counters.
pub fn raw_line_records(left: &str, right: &str, options: &DiffOptions) -> DiffResult {
    let old = split_lines(left);
    let new = split_lines(right);
    let ops = capture_diff_slices(options.algorithm.into(), &old[..], &new[..]);

    let mut result = DiffResult::new();
    let mut left_line = 1usize;
    let mut right_line = 1usize;

    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for line in &old[old_range] {
                    if !line.is_empty() {
                        result.lines.push(LineRecord::unchanged(left_line, line));
                    }
                    left_line += 1;
                    right_line += 1;
                }
            }
            DiffTag::Delete => {
                push_removed(&mut result, &old[old_range], &mut left_line);
            }
            DiffTag::Insert => {
                push_added(&mut result, &new[new_range], &mut right_line);
            }
            DiffTag::Replace => {
                push_removed(&mut result, &old[old_range], &mut left_line);
                push_added(&mut result, &new[new_range], &mut right_line);
            }
        }
    }

    result
}

fn push_removed(result: &mut DiffResult, lines: &[&str], left_line: &mut usize) {
    for line in lines {
        result.lines.push(LineRecord::removed(*left_line, line));
        *left_line += 1;
        result.deletions += 1;
        result.total_changes += 1;
    }
}

fn push_added(result: &mut DiffResult, lines: &[&str], right_line: &mut usize) {
    for line in lines {
        result.lines.push(LineRecord::added(*right_line, line));
        *right_line += 1;
        result.additions += 1;
        result.total_changes += 1;
    }
}
