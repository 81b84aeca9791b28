//! Alignment results in token coordinates.
//!
//! A [`DiffIterable`] is the list of changed ranges between two token
//! sequences. The gaps between changes are unchanged and always have the same
//! length on both sides, so every unchanged token of side 1 is paired with
//! exactly one token of side 2.

use seam_types::{ComparisonError, ComparisonResult, Range};

/// Changed ranges between two token sequences of lengths `length1` and `length2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffIterable {
    length1: usize,
    length2: usize,
    changes: Vec<Range>,
}

impl DiffIterable {
    /// Wrap precomputed changes. The caller guarantees the invariants; use
    /// [`DiffIterable::verify`] to check them.
    pub fn new(changes: Vec<Range>, length1: usize, length2: usize) -> Self {
        Self {
            length1,
            length2,
            changes,
        }
    }

    /// The alignment of two sequences with nothing in common.
    pub fn whole_change(length1: usize, length2: usize) -> Self {
        let changes = if length1 == 0 && length2 == 0 {
            Vec::new()
        } else {
            vec![Range::new(0, length1, 0, length2)]
        };
        Self::new(changes, length1, length2)
    }

    pub fn length1(&self) -> usize {
        self.length1
    }

    pub fn length2(&self) -> usize {
        self.length2
    }

    pub fn changes(&self) -> &[Range] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Range> {
        self.changes
    }

    /// Returns `true` if the sequences are identical.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The unchanged gaps, each with `len1() == len2()`. Empty gaps are skipped.
    pub fn unchanged(&self) -> Vec<Range> {
        let mut result = Vec::new();
        let (mut last1, mut last2) = (0, 0);
        for change in &self.changes {
            if change.start1 > last1 {
                result.push(Range::new(last1, change.start1, last2, change.start2));
            }
            last1 = change.end1;
            last2 = change.end2;
        }
        if last1 < self.length1 {
            result.push(Range::new(last1, self.length1, last2, self.length2));
        }
        result
    }

    /// Check ordering, bounds, maximality and that every unchanged pair of
    /// tokens has equal keys.
    pub fn verify<K: PartialEq>(&self, keys1: &[K], keys2: &[K]) -> ComparisonResult<()> {
        let violation = |msg: String| Err(ComparisonError::InvariantViolation(msg));
        if keys1.len() != self.length1 || keys2.len() != self.length2 {
            return violation(format!(
                "lengths {}/{} do not match keys {}/{}",
                self.length1,
                self.length2,
                keys1.len(),
                keys2.len()
            ));
        }
        let (mut last1, mut last2) = (0, 0);
        for (i, change) in self.changes.iter().enumerate() {
            if change.is_empty() || change.start1 > change.end1 || change.start2 > change.end2 {
                return violation(format!("malformed change {change:?}"));
            }
            if change.end1 > self.length1 || change.end2 > self.length2 {
                return violation(format!("change {change:?} beyond sequence end"));
            }
            if change.start1 < last1 || change.start2 < last2 {
                return violation(format!("change {change:?} overlaps its predecessor"));
            }
            if i > 0 && change.start1 == last1 && change.start2 == last2 {
                return violation(format!("change {change:?} touches its predecessor"));
            }
            if change.start1 - last1 != change.start2 - last2 {
                return violation(format!("unfair gap before {change:?}"));
            }
            if keys1[last1..change.start1] != keys2[last2..change.start2] {
                return violation(format!("unequal gap before {change:?}"));
            }
            last1 = change.end1;
            last2 = change.end2;
        }
        if keys1[last1..] != keys2[last2..] {
            return violation("unequal trailing gap".into());
        }
        Ok(())
    }
}

/// Collects an alignment from the equal pairs found by a comparator.
///
/// Equal runs must be reported in increasing order; everything between them
/// becomes a change.
#[derive(Debug)]
pub struct ChangeBuilder {
    length1: usize,
    length2: usize,
    index1: usize,
    index2: usize,
    changes: Vec<Range>,
}

impl ChangeBuilder {
    pub fn new(length1: usize, length2: usize) -> Self {
        Self {
            length1,
            length2,
            index1: 0,
            index2: 0,
            changes: Vec::new(),
        }
    }

    /// Record that `count` tokens starting at `index1`/`index2` are equal.
    pub fn mark_equal(&mut self, index1: usize, index2: usize, count: usize) {
        if count == 0 {
            return;
        }
        debug_assert!(index1 >= self.index1 && index2 >= self.index2);
        if index1 > self.index1 || index2 > self.index2 {
            self.changes
                .push(Range::new(self.index1, index1, self.index2, index2));
        }
        self.index1 = index1 + count;
        self.index2 = index2 + count;
    }

    /// Record every unchanged pair of `iterable`, shifted by the given offsets.
    pub fn mark_unchanged_of(&mut self, iterable: &DiffIterable, shift1: usize, shift2: usize) {
        for range in iterable.unchanged() {
            self.mark_equal(range.start1 + shift1, range.start2 + shift2, range.len1());
        }
    }

    pub fn finish(mut self) -> DiffIterable {
        if self.index1 < self.length1 || self.index2 < self.length2 {
            self.changes.push(Range::new(
                self.index1,
                self.length1,
                self.index2,
                self.length2,
            ));
        }
        DiffIterable::new(self.changes, self.length1, self.length2)
    }
}

/// Merge changes that touch on both sides.
pub fn merge_adjacent(changes: Vec<Range>) -> Vec<Range> {
    let mut result: Vec<Range> = Vec::with_capacity(changes.len());
    for change in changes {
        match result.last_mut() {
            Some(last) if last.end1 == change.start1 && last.end2 == change.start2 => {
                last.end1 = change.end1;
                last.end2 = change.end2;
            }
            _ => result.push(change),
        }
    }
    result
}
