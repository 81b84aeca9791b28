//! Line-level three-way merge.

use seam_diff::{compare_line_texts, line_key, split_lines};
use seam_types::{CancellationToken, ComparisonConfig, ComparisonPolicy, MergeRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{ChangeKind, MergeConflictType};
use crate::error::MergeResult;
use crate::fair::build_fair;
use crate::resolver::try_resolve;

/// A merge range in line numbers (left, base, right) with its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeLineFragment {
    pub range: MergeRange,
    pub conflict_type: MergeConflictType,
}

/// Texts split into lines, indexed by a [`MergeRange`].
pub(crate) struct MergeLines<'a> {
    pub left: Vec<&'a str>,
    pub base: Vec<&'a str>,
    pub right: Vec<&'a str>,
}

impl<'a> MergeLines<'a> {
    pub fn new(left: &'a str, base: &'a str, right: &'a str) -> Self {
        Self {
            left: split_lines(left),
            base: split_lines(base),
            right: split_lines(right),
        }
    }

    pub fn left_of(&self, range: &MergeRange) -> &[&'a str] {
        &self.left[range.start1..range.end1]
    }

    pub fn base_of(&self, range: &MergeRange) -> &[&'a str] {
        &self.base[range.start2..range.end2]
    }

    pub fn right_of(&self, range: &MergeRange) -> &[&'a str] {
        &self.right[range.start3..range.end3]
    }
}

/// Align `left` and `right` against `base` line by line and classify every
/// range where they differ from the base.
pub fn merge_lines(
    left: &str,
    base: &str,
    right: &str,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> MergeResult<Vec<MergeLineFragment>> {
    let lines = MergeLines::new(left, base, right);
    merge_split_lines(&lines, policy, config, cancel)
}

pub(crate) fn merge_split_lines(
    lines: &MergeLines<'_>,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> MergeResult<Vec<MergeLineFragment>> {
    let base_left = compare_line_texts(&lines.base, &lines.left, policy, config, cancel)?;
    let base_right = compare_line_texts(&lines.base, &lines.right, policy, config, cancel)?;
    let ranges = build_fair(&base_left, &base_right, cancel)?;

    let mut fragments = Vec::with_capacity(ranges.len());
    for range in ranges {
        cancel.check()?;
        let conflict_type = classify(lines, &range, policy, cancel)?;
        fragments.push(MergeLineFragment {
            range,
            conflict_type,
        });
    }
    debug!(
        ?policy,
        fragments = fragments.len(),
        conflicts = fragments.iter().filter(|f| f.conflict_type.is_conflict()).count(),
        "merged lines"
    );
    Ok(fragments)
}

fn classify(
    lines: &MergeLines<'_>,
    range: &MergeRange,
    policy: ComparisonPolicy,
    cancel: &CancellationToken,
) -> MergeResult<MergeConflictType> {
    let left = lines.left_of(range);
    let base = lines.base_of(range);
    let right = lines.right_of(range);

    if range.is_base_empty() {
        let kind = if range.is_left_empty() {
            MergeConflictType::change(ChangeKind::Inserted, false, true)
        } else if range.is_right_empty() {
            MergeConflictType::change(ChangeKind::Inserted, true, false)
        } else if same_lines(left, right, policy) {
            MergeConflictType::change(ChangeKind::Inserted, true, true)
        } else {
            conflict(left, base, right, cancel)?
        };
        return Ok(kind);
    }
    if range.is_left_empty() && range.is_right_empty() {
        return Ok(MergeConflictType::change(ChangeKind::Deleted, true, true));
    }
    if same_lines(left, base, policy) {
        return Ok(one_sided(range.is_right_empty(), false));
    }
    if same_lines(right, base, policy) {
        return Ok(one_sided(range.is_left_empty(), true));
    }
    if same_lines(left, right, policy) {
        return Ok(MergeConflictType::change(ChangeKind::Modified, true, true));
    }
    conflict(left, base, right, cancel)
}

fn one_sided(emptied: bool, left_changed: bool) -> MergeConflictType {
    let kind = if emptied {
        ChangeKind::Deleted
    } else {
        ChangeKind::Modified
    };
    MergeConflictType::change(kind, left_changed, !left_changed)
}

fn conflict(
    left: &[&str],
    base: &[&str],
    right: &[&str],
    cancel: &CancellationToken,
) -> MergeResult<MergeConflictType> {
    let resolved = try_resolve(&left.join("\n"), &base.join("\n"), &right.join("\n"), cancel)?;
    Ok(MergeConflictType::conflict(resolved.is_some()))
}

fn same_lines(lines1: &[&str], lines2: &[&str], policy: ComparisonPolicy) -> bool {
    lines1.len() == lines2.len()
        && lines1
            .iter()
            .zip(lines2)
            .all(|(a, b)| line_key(a, policy) == line_key(b, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(left: &str, base: &str, right: &str, policy: ComparisonPolicy) -> Vec<MergeLineFragment> {
        merge_lines(left, base, right, policy, &ComparisonConfig::verifying(), &CancellationToken::new()).unwrap()
    }

    fn kinds(fragments: &[MergeLineFragment]) -> Vec<(MergeRange, ChangeKind, bool, bool)> {
        fragments
            .iter()
            .map(|f| {
                let t = f.conflict_type;
                (f.range, t.kind, t.left_changed, t.right_changed)
            })
            .collect()
    }

    #[test]
    fn unchanged_texts_merge_to_nothing() {
        assert!(merge("a\nb", "a\nb", "a\nb", ComparisonPolicy::Default).is_empty());
    }

    #[test]
    fn changes_on_different_lines() {
        let fragments = merge("a\nB\nc\nd", "a\nb\nc\nd", "a\nb\nc\nD", ComparisonPolicy::Default);
        assert_eq!(
            kinds(&fragments),
            vec![
                (MergeRange::new(1, 2, 1, 2, 1, 2), ChangeKind::Modified, true, false),
                (MergeRange::new(3, 4, 3, 4, 3, 4), ChangeKind::Modified, false, true),
            ]
        );
    }

    #[test]
    fn deletion_and_insertion() {
        let fragments = merge("a\nc", "a\nb\nc", "a\nb\nc\nd", ComparisonPolicy::Default);
        assert_eq!(
            kinds(&fragments),
            vec![
                (MergeRange::new(1, 1, 1, 2, 1, 2), ChangeKind::Deleted, true, false),
                (MergeRange::new(2, 2, 3, 3, 3, 4), ChangeKind::Inserted, false, true),
            ]
        );
    }

    #[test]
    fn both_sides_delete_the_same_line() {
        let fragments = merge("a\nc", "a\nb\nc", "a\nc", ComparisonPolicy::Default);
        assert_eq!(
            kinds(&fragments),
            vec![(MergeRange::new(1, 1, 1, 2, 1, 1), ChangeKind::Deleted, true, true)]
        );
    }

    #[test]
    fn same_edit_on_both_sides() {
        let fragments = merge("a\nX\nc", "a\nb\nc", "a\nX\nc", ComparisonPolicy::Default);
        assert_eq!(
            kinds(&fragments),
            vec![(MergeRange::new(1, 2, 1, 2, 1, 2), ChangeKind::Modified, true, true)]
        );
    }

    #[test]
    fn competing_edits_conflict() {
        let fragments = merge("a\nX\nc", "a\nb\nc", "a\nY\nc", ComparisonPolicy::Default);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].conflict_type.is_conflict());
        assert!(!fragments[0].conflict_type.resolvable);
    }

    #[test]
    fn word_level_conflicts_are_resolvable() {
        let fragments = merge(
            "one 2 three\nend",
            "one two three\nend",
            "one two 3\nend",
            ComparisonPolicy::Default,
        );
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].range, MergeRange::new(0, 1, 0, 1, 0, 1));
        assert_eq!(fragments[0].conflict_type, MergeConflictType::conflict(true));
    }

    #[test]
    fn whitespace_edits_follow_the_policy() {
        let fragments = merge("a\n  b\nc", "a\nb\nc", "a\nB\nc", ComparisonPolicy::TrimWhitespaces);
        assert_eq!(
            kinds(&fragments),
            vec![(MergeRange::new(1, 2, 1, 2, 1, 2), ChangeKind::Modified, false, true)]
        );
    }
}
