//! Two-way and three-way index ranges.
//!
//! Unlike fragments, ranges carry no offsets: they are expressed in whatever
//! unit the producer works in (tokens, lines), and they may be empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A pair of half-open ranges `[start1, end1)` and `[start2, end2)`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
}

impl Range {
    /// Create a range without validation.
    ///
    /// Callers constructing ranges from untrusted input should use
    /// [`Range::checked`].
    pub const fn new(start1: usize, end1: usize, start2: usize, end2: usize) -> Self {
        Self {
            start1,
            end1,
            start2,
            end2,
        }
    }

    /// Create a range, rejecting inverted sides.
    pub fn checked(start1: usize, end1: usize, start2: usize, end2: usize) -> Result<Self, TypeError> {
        if start1 > end1 {
            return Err(TypeError::InvertedRange {
                start: start1,
                end: end1,
            });
        }
        if start2 > end2 {
            return Err(TypeError::InvertedRange {
                start: start2,
                end: end2,
            });
        }
        Ok(Self::new(start1, end1, start2, end2))
    }

    pub fn len1(&self) -> usize {
        self.end1 - self.start1
    }

    pub fn len2(&self) -> usize {
        self.end2 - self.start2
    }

    /// Returns `true` if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.start1 == self.end1 && self.start2 == self.end2
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) - [{}, {})",
            self.start1, self.end1, self.start2, self.end2
        )
    }
}

/// A three-way range in (left, base, right) coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRange {
    /// Left side.
    pub start1: usize,
    pub end1: usize,
    /// Base.
    pub start2: usize,
    pub end2: usize,
    /// Right side.
    pub start3: usize,
    pub end3: usize,
}

impl MergeRange {
    pub const fn new(
        start1: usize,
        end1: usize,
        start2: usize,
        end2: usize,
        start3: usize,
        end3: usize,
    ) -> Self {
        Self {
            start1,
            end1,
            start2,
            end2,
            start3,
            end3,
        }
    }

    /// Returns `true` if all three sides are empty.
    pub fn is_empty(&self) -> bool {
        self.start1 == self.end1 && self.start2 == self.end2 && self.start3 == self.end3
    }

    /// Returns `true` if the left side is empty.
    pub fn is_left_empty(&self) -> bool {
        self.start1 == self.end1
    }

    /// Returns `true` if the base is empty.
    pub fn is_base_empty(&self) -> bool {
        self.start2 == self.end2
    }

    /// Returns `true` if the right side is empty.
    pub fn is_right_empty(&self) -> bool {
        self.start3 == self.end3
    }
}

impl fmt::Debug for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) - [{}, {}) - [{}, {})",
            self.start1, self.end1, self.start2, self.end2, self.start3, self.end3
        )
    }
}
