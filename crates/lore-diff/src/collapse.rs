//! Second pass over raw line records: fold removed+added neighbours into
//! single `Modified` records.

use crate::types::{DiffResult, DiffType};
use crate::word::word_segments;

/// Collapse every `Removed` record immediately followed by an `Added` record.
///
/// The scan is a single greedy pass over the original indices: absorbed
/// records are only marked during the scan and filtered out afterwards, so a
/// block `R1 R2 A1 A2` becomes `R1 M(R2, A1) A2`. `total_changes` is left as
/// counted by the first pass.
pub fn collapse_modifications(result: &mut DiffResult) {
    let mut absorbed = vec![false; result.lines.len()];

    for i in 1..result.lines.len() {
        if result.lines[i].diff_type != DiffType::Added
            || result.lines[i - 1].diff_type != DiffType::Removed
        {
            continue;
        }

        let right = result.lines[i].right_content.clone();
        let prev = &mut result.lines[i - 1];
        prev.segments = word_segments(&prev.left_content, &right, prev.line_number);
        prev.right_content = right;
        prev.diff_type = DiffType::Modified;

        result.modifications += 1;
        result.additions -= 1;
        result.deletions -= 1;
        absorbed[i] = true;
    }

    let mut flags = absorbed.into_iter();
    result.lines.retain(|_| !flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DiffOptions;
    use crate::raw_line_records;

    fn kinds(result: &DiffResult) -> Vec<DiffType> {
        result.lines.iter().map(|l| l.diff_type).collect()
    }

    #[test]
    fn collapses_single_pair() {
        let mut result = raw_line_records("A\nB", "A\nX", &DiffOptions::default());
        collapse_modifications(&mut result);

        assert_eq!(kinds(&result), vec![DiffType::Unchanged, DiffType::Modified]);
        assert_eq!(result.lines[0].left_content, "A");
        assert_eq!(result.lines[1].left_content, "B");
        assert_eq!(result.lines[1].right_content, "X");
        assert_eq!(result.additions, 0);
        assert_eq!(result.deletions, 0);
        assert_eq!(result.modifications, 1);
    }

    #[test]
    fn modified_segments_are_recomputed() {
        let mut result = raw_line_records("hello cat\n", "hello dog\n", &DiffOptions::default());
        collapse_modifications(&mut result);

        let record = &result.lines[0];
        assert_eq!(record.diff_type, DiffType::Modified);
        assert_eq!(record.segments.len(), 2);
        assert_eq!(record.segments[0].segment_type, DiffType::Removed);
        assert_eq!(record.segments[0].start_column, 7);
        assert_eq!(record.segments[1].segment_type, DiffType::Added);
    }

    #[test]
    fn block_collapses_pairwise_at_boundary_only() {
        let mut result = raw_line_records("r1\nr2\n", "a1\na2\n", &DiffOptions::default());
        assert_eq!(
            kinds(&result),
            vec![DiffType::Removed, DiffType::Removed, DiffType::Added, DiffType::Added]
        );
        collapse_modifications(&mut result);

        assert_eq!(
            kinds(&result),
            vec![DiffType::Removed, DiffType::Modified, DiffType::Added]
        );
        assert_eq!(result.lines[1].left_content, "r2");
        assert_eq!(result.lines[1].right_content, "a1");
        assert_eq!(result.lines[2].right_content, "a2");
        assert_eq!((result.additions, result.deletions, result.modifications), (1, 1, 1));
        assert_eq!(result.total_changes, 4);
    }

    #[test]
    fn added_before_removed_is_not_collapsed() {
        let mut result = DiffResult::new();
        result.lines.push(crate::types::LineRecord::added(1, "new"));
        result.lines.push(crate::types::LineRecord::removed(1, "old"));
        result.additions = 1;
        result.deletions = 1;
        result.total_changes = 2;

        collapse_modifications(&mut result);
        assert_eq!(kinds(&result), vec![DiffType::Added, DiffType::Removed]);
        assert_eq!(result.modifications, 0);
    }

    #[test]
    fn empty_result_is_untouched() {
        let mut result = DiffResult::new();
        collapse_modifications(&mut result);
        assert_eq!(result, DiffResult::new());
    }
}
