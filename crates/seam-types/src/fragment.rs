//! Difference fragments reported by the comparison engine.
//!
//! All offsets are UTF-8 byte offsets into the compared texts and every range
//! is half-open. A fragment is never empty on both sides at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A difference between `text1[start_offset1..end_offset1]` and
/// `text2[start_offset2..end_offset2]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffFragment {
    pub start_offset1: usize,
    pub end_offset1: usize,
    pub start_offset2: usize,
    pub end_offset2: usize,
}

impl DiffFragment {
    /// Create a fragment, validating that both ranges are ordered and that
    /// at least one of them is non-empty.
    pub fn new(
        start_offset1: usize,
        end_offset1: usize,
        start_offset2: usize,
        end_offset2: usize,
    ) -> Result<Self, TypeError> {
        check_range(start_offset1, end_offset1)?;
        check_range(start_offset2, end_offset2)?;
        let fragment = Self {
            start_offset1,
            end_offset1,
            start_offset2,
            end_offset2,
        };
        if fragment.is_empty() {
            return Err(TypeError::EmptyFragment(fragment.to_string()));
        }
        Ok(fragment)
    }

    /// Returns `true` if both sides are empty (never true for a validated fragment).
    pub fn is_empty(&self) -> bool {
        self.start_offset1 == self.end_offset1 && self.start_offset2 == self.end_offset2
    }

    /// Length of the first side in bytes.
    pub fn len1(&self) -> usize {
        self.end_offset1 - self.start_offset1
    }

    /// Length of the second side in bytes.
    pub fn len2(&self) -> usize {
        self.end_offset2 - self.start_offset2
    }

    /// Returns `true` if the fragment only inserts text on side 2.
    pub fn is_insertion(&self) -> bool {
        self.len1() == 0 && self.len2() > 0
    }

    /// Returns `true` if the fragment only deletes text from side 1.
    pub fn is_deletion(&self) -> bool {
        self.len1() > 0 && self.len2() == 0
    }

    /// The same fragment moved by the given offsets.
    pub fn shifted(&self, shift1: usize, shift2: usize) -> Self {
        Self {
            start_offset1: self.start_offset1 + shift1,
            end_offset1: self.end_offset1 + shift1,
            start_offset2: self.start_offset2 + shift2,
            end_offset2: self.end_offset2 + shift2,
        }
    }
}

impl fmt::Debug for DiffFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiffFragment{self}")
    }
}

impl fmt::Display for DiffFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) - [{}, {})",
            self.start_offset1, self.end_offset1, self.start_offset2, self.end_offset2
        )
    }
}

/// A line-granularity difference.
///
/// Composes the byte offsets of the affected lines with their line numbers
/// and optional word-level detail. Offsets of `inner` fragments are relative
/// to this fragment's own start offsets on each side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineFragment {
    pub start_line1: usize,
    pub end_line1: usize,
    pub start_line2: usize,
    pub end_line2: usize,
    /// Byte offsets covered by the lines on each side.
    pub offsets: DiffFragment,
    /// Word-level detail, when it was computed and deemed useful.
    pub inner: Option<Vec<DiffFragment>>,
}

impl LineFragment {
    /// Create a line fragment without inner detail.
    pub fn new(
        start_line1: usize,
        end_line1: usize,
        start_line2: usize,
        end_line2: usize,
        offsets: DiffFragment,
    ) -> Result<Self, TypeError> {
        check_range(start_line1, end_line1)?;
        check_range(start_line2, end_line2)?;
        if start_line1 == end_line1 && start_line2 == end_line2 {
            return Err(TypeError::EmptyFragment(format!(
                "lines [{start_line1}, {end_line1}) - [{start_line2}, {end_line2})"
            )));
        }
        Ok(Self {
            start_line1,
            end_line1,
            start_line2,
            end_line2,
            offsets,
            inner: None,
        })
    }

    /// Attach (or clear) inner fragments.
    pub fn with_inner(mut self, inner: Option<Vec<DiffFragment>>) -> Self {
        self.inner = inner;
        self
    }

    /// Number of lines on side 1.
    pub fn line_count1(&self) -> usize {
        self.end_line1 - self.start_line1
    }

    /// Number of lines on side 2.
    pub fn line_count2(&self) -> usize {
        self.end_line2 - self.start_line2
    }

    /// Returns `true` if `next` starts exactly where this fragment ends on
    /// both sides, so the two can be squashed into one.
    pub fn touches(&self, next: &LineFragment) -> bool {
        self.end_line1 == next.start_line1 && self.end_line2 == next.start_line2
    }

    /// Inner fragments translated to absolute offsets.
    pub fn absolute_inner(&self) -> Option<Vec<DiffFragment>> {
        self.inner.as_ref().map(|inner| {
            inner
                .iter()
                .map(|f| f.shifted(self.offsets.start_offset1, self.offsets.start_offset2))
                .collect()
        })
    }
}

fn check_range(start: usize, end: usize) -> Result<(), TypeError> {
    if start > end {
        return Err(TypeError::InvertedRange { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_fragment() {
        assert!(matches!(
            DiffFragment::new(3, 3, 5, 5),
            Err(TypeError::EmptyFragment(_))
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            DiffFragment::new(4, 2, 0, 1),
            Err(TypeError::InvertedRange { start: 4, end: 2 })
        );
    }

    #[test]
    fn insertion_and_deletion() {
        let ins = DiffFragment::new(2, 2, 2, 5).unwrap();
        assert!(ins.is_insertion());
        assert!(!ins.is_deletion());
        let del = DiffFragment::new(0, 3, 0, 0).unwrap();
        assert!(del.is_deletion());
        assert_eq!(del.len1(), 3);
    }

    #[test]
    fn display_format() {
        let f = DiffFragment::new(1, 2, 3, 4).unwrap();
        assert_eq!(f.to_string(), "[1, 2) - [3, 4)");
        assert_eq!(format!("{f:?}"), "DiffFragment[1, 2) - [3, 4)");
    }

    #[test]
    fn absolute_inner_offsets() {
        let offsets = DiffFragment::new(10, 20, 30, 45).unwrap();
        let fragment = LineFragment::new(2, 3, 4, 6, offsets)
            .unwrap()
            .with_inner(Some(vec![DiffFragment::new(1, 2, 1, 4).unwrap()]));
        let inner = fragment.absolute_inner().unwrap();
        assert_eq!(inner, vec![DiffFragment::new(11, 12, 31, 34).unwrap()]);
    }

    #[test]
    fn line_fragment_touching() {
        let a = LineFragment::new(0, 1, 0, 1, DiffFragment::new(0, 2, 0, 2).unwrap()).unwrap();
        let b = LineFragment::new(1, 2, 1, 1, DiffFragment::new(2, 4, 2, 2).unwrap()).unwrap();
        assert!(a.touches(&b));
        assert!(!b.touches(&a));
    }

    #[test]
    fn line_fragment_rejects_empty_lines() {
        let offsets = DiffFragment::new(0, 1, 0, 0).unwrap();
        assert!(LineFragment::new(1, 1, 2, 2, offsets).is_err());
    }
}
