//! Three-way merge ranges.
//!
//! Given the alignments base→left and base→right, the base tokens unchanged
//! in both are stable. Everything between two stable runs forms one merge
//! range, so changes of the two sides that overlap or touch in the base end
//! up in the same range.

use seam_diff::DiffIterable;
use seam_types::{CancellationToken, MergeRange};
use tracing::trace;

use crate::error::{MergeError, MergeResult};

/// A run of base tokens unchanged on both sides, with its start in each text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StableRun {
    left: usize,
    base: usize,
    right: usize,
    len: usize,
}

/// Build merge ranges in (left, base, right) coordinates.
///
/// Side 1 of both iterables must be the base.
pub fn build_fair(
    left: &DiffIterable,
    right: &DiffIterable,
    cancel: &CancellationToken,
) -> MergeResult<Vec<MergeRange>> {
    if left.length1() != right.length1() {
        return Err(MergeError::BaseLengthMismatch {
            left: left.length1(),
            right: right.length1(),
        });
    }
    cancel.check()?;

    let stable = stable_runs(left, right);
    let mut ranges = Vec::new();
    let (mut left_pos, mut base_pos, mut right_pos) = (0, 0, 0);
    let ends = StableRun {
        left: left.length2(),
        base: left.length1(),
        right: right.length2(),
        len: 0,
    };
    for run in stable.iter().chain(std::iter::once(&ends)) {
        let range = MergeRange::new(left_pos, run.left, base_pos, run.base, right_pos, run.right);
        if !range.is_empty() {
            ranges.push(range);
        }
        left_pos = run.left + run.len;
        base_pos = run.base + run.len;
        right_pos = run.right + run.len;
    }
    trace!(stable = stable.len(), ranges = ranges.len(), "built merge ranges");
    Ok(ranges)
}

fn stable_runs(left: &DiffIterable, right: &DiffIterable) -> Vec<StableRun> {
    let unchanged_left = left.unchanged();
    let unchanged_right = right.unchanged();
    let mut runs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < unchanged_left.len() && j < unchanged_right.len() {
        let l = &unchanged_left[i];
        let r = &unchanged_right[j];
        let start = l.start1.max(r.start1);
        let end = l.end1.min(r.end1);
        if start < end {
            runs.push(StableRun {
                left: l.start2 + (start - l.start1),
                base: start,
                right: r.start2 + (start - r.start1),
                len: end - start,
            });
        }
        if l.end1 <= r.end1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use seam_types::Range;

    fn iterable(changes: Vec<Range>, length1: usize, length2: usize) -> DiffIterable {
        DiffIterable::new(changes, length1, length2)
    }

    fn build(left: &DiffIterable, right: &DiffIterable) -> Vec<MergeRange> {
        build_fair(left, right, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn identical_sides_produce_nothing() {
        let same = iterable(vec![], 4, 4);
        assert!(build(&same, &same).is_empty());
    }

    #[test]
    fn separate_changes_stay_separate() {
        // base: 0 1 2 3 4; left modifies 1, right deletes 3.
        let left = iterable(vec![Range::new(1, 2, 1, 2)], 5, 5);
        let right = iterable(vec![Range::new(3, 4, 3, 3)], 5, 4);
        assert_eq!(
            build(&left, &right),
            vec![MergeRange::new(1, 2, 1, 2, 1, 2), MergeRange::new(3, 4, 3, 4, 3, 3)]
        );
    }

    #[test]
    fn touching_changes_merge() {
        let left = iterable(vec![Range::new(1, 2, 1, 1)], 4, 3);
        let right = iterable(vec![Range::new(2, 3, 2, 4)], 4, 5);
        assert_eq!(build(&left, &right), vec![MergeRange::new(1, 2, 1, 3, 1, 4)]);
    }

    #[test]
    fn insertions_at_the_same_point() {
        let left = iterable(vec![Range::new(2, 2, 2, 3)], 4, 5);
        let right = iterable(vec![Range::new(2, 2, 2, 4)], 4, 6);
        assert_eq!(build(&left, &right), vec![MergeRange::new(2, 3, 2, 2, 2, 4)]);
    }

    #[test]
    fn one_sided_insertion_between_stable_runs() {
        let left = iterable(vec![], 3, 3);
        let right = iterable(vec![Range::new(1, 1, 1, 2)], 3, 4);
        assert_eq!(build(&left, &right), vec![MergeRange::new(1, 1, 1, 1, 1, 2)]);
    }

    #[test]
    fn base_lengths_must_match() {
        let left = iterable(vec![], 3, 3);
        let right = iterable(vec![], 4, 4);
        assert_eq!(
            build_fair(&left, &right, &CancellationToken::new()),
            Err(MergeError::BaseLengthMismatch { left: 3, right: 4 })
        );
    }
}
