//! Line comparison that disregards caller-marked byte ranges.
//!
//! Ignored bytes are removed from the line keys before alignment, so a line
//! that only differs inside an ignored range (a timestamp, a generated id)
//! compares equal. Offsets in the result always refer to the original texts.

use std::ops::Range as ByteRange;

use seam_types::{
    CancellationToken, ComparisonConfig, ComparisonError, ComparisonPolicy, ComparisonResult,
    DiffFragment, LineFragment, LineOffsets, Range,
};
use tracing::debug;

use crate::by_line::{compare_line_texts, line_fragment};
use crate::by_word::compare_words_checked;
use crate::fragments::content_range;

/// Input of [`compare_lines_with_ignored_ranges`].
#[derive(Clone, Debug)]
pub struct IgnoredRangesInput<'a> {
    pub text1: &'a str,
    pub text2: &'a str,
    pub line_offsets1: &'a LineOffsets,
    pub line_offsets2: &'a LineOffsets,
    /// Byte ranges of `text1` to disregard. Must lie on char boundaries.
    pub ignored1: &'a [ByteRange<usize>],
    /// Byte ranges of `text2` to disregard. Must lie on char boundaries.
    pub ignored2: &'a [ByteRange<usize>],
    /// Compute word-level inner fragments.
    pub inner_changes: bool,
    /// Restrict the comparison to these lines of each side.
    pub window: Option<Range>,
}

/// Result of [`compare_lines_with_ignored_ranges`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoredRangesOutcome {
    pub fragments: Vec<LineFragment>,
    /// Per side, the number of changed lines that are not entirely ignored.
    pub changed_lines: (usize, usize),
}

/// One side of the comparison with its ignored-byte mask.
struct Side<'a> {
    text: &'a str,
    offsets: &'a LineOffsets,
    ignored: Vec<bool>,
}

impl<'a> Side<'a> {
    fn new(
        name: &str,
        text: &'a str,
        offsets: &'a LineOffsets,
        ranges: &[ByteRange<usize>],
    ) -> ComparisonResult<Self> {
        if !offsets.matches_text(text) {
            return Err(ComparisonError::InvalidArgument(format!(
                "line offsets of {name} do not match its text"
            )));
        }
        let mut ignored = vec![false; text.len()];
        for range in ranges {
            if range.start > range.end || range.end > text.len() {
                return Err(ComparisonError::InvalidArgument(format!(
                    "ignored range {range:?} of {name} is out of bounds"
                )));
            }
            if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
                return Err(ComparisonError::InvalidArgument(format!(
                    "ignored range {range:?} of {name} splits a character"
                )));
            }
            ignored[range.clone()].fill(true);
        }
        Ok(Self {
            text,
            offsets,
            ignored,
        })
    }

    /// The text of `[start, end)` without ignored bytes, and the original
    /// offset of every kept byte.
    fn filtered(&self, start: usize, end: usize) -> (String, Vec<usize>) {
        let mut kept = String::with_capacity(end - start);
        let mut origins = Vec::with_capacity(end - start);
        for (i, c) in self.text[start..end].char_indices() {
            let offset = start + i;
            if !self.ignored[offset] {
                kept.push(c);
                origins.extend(offset..offset + c.len_utf8());
            }
        }
        (kept, origins)
    }

    fn line_key(&self, line: usize) -> String {
        self.filtered(self.offsets.line_start(line), self.offsets.line_end(line)).0
    }

    /// Non-empty lines whose every byte is ignored.
    fn is_fully_ignored(&self, line: usize) -> bool {
        let (start, end) = (self.offsets.line_start(line), self.offsets.line_end(line));
        start < end && self.ignored[start..end].iter().all(|&i| i)
    }
}

/// Compare lines of two texts while disregarding the given byte ranges.
pub fn compare_lines_with_ignored_ranges(
    input: &IgnoredRangesInput<'_>,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<IgnoredRangesOutcome> {
    let side1 = Side::new("text1", input.text1, input.line_offsets1, input.ignored1)?;
    let side2 = Side::new("text2", input.text2, input.line_offsets2, input.ignored2)?;

    let count1 = input.line_offsets1.line_count();
    let count2 = input.line_offsets2.line_count();
    let window = input.window.unwrap_or(Range::new(0, count1, 0, count2));
    if window.start1 > window.end1
        || window.start2 > window.end2
        || window.end1 > count1
        || window.end2 > count2
    {
        return Err(ComparisonError::InvalidArgument(format!(
            "window {window:?} exceeds line counts {count1}/{count2}"
        )));
    }

    let keys1: Vec<String> = (window.start1..window.end1).map(|l| side1.line_key(l)).collect();
    let keys2: Vec<String> = (window.start2..window.end2).map(|l| side2.line_key(l)).collect();
    let iterable = compare_line_texts(&keys1, &keys2, ComparisonPolicy::Default, config, cancel)?;

    let mut fragments = Vec::with_capacity(iterable.changes().len());
    for change in iterable.changes() {
        let range = Range::new(
            change.start1 + window.start1,
            change.end1 + window.start1,
            change.start2 + window.start2,
            change.end2 + window.start2,
        );
        let all_ignored = (range.start1..range.end1).all(|l| side1.is_fully_ignored(l))
            && (range.start2..range.end2).all(|l| side2.is_fully_ignored(l));
        if all_ignored {
            continue;
        }
        let fragment = line_fragment(&range, input.line_offsets1, input.line_offsets2);
        if !input.inner_changes || range.len1() == 0 || range.len2() == 0 {
            fragments.push(fragment);
            continue;
        }
        let inner = inner_fragments(&side1, &side2, &fragment, config, cancel)?;
        if !inner.is_empty() {
            fragments.push(fragment.with_inner(Some(inner)));
        }
    }

    let changed_lines = fragments.iter().fold((0, 0), |(n1, n2), f| {
        (
            n1 + (f.start_line1..f.end_line1).filter(|&l| !side1.is_fully_ignored(l)).count(),
            n2 + (f.start_line2..f.end_line2).filter(|&l| !side2.is_fully_ignored(l)).count(),
        )
    });
    debug!(
        window = ?window,
        fragments = fragments.len(),
        changed1 = changed_lines.0,
        changed2 = changed_lines.1,
        "compared lines with ignored ranges"
    );
    Ok(IgnoredRangesOutcome {
        fragments,
        changed_lines,
    })
}

/// Word fragments of the filtered fragment texts, relative to the
/// fragment's start offsets in the original texts.
fn inner_fragments(
    side1: &Side<'_>,
    side2: &Side<'_>,
    fragment: &LineFragment,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<DiffFragment>> {
    let (start1, end1) = content_range(side1.offsets, fragment.start_line1, fragment.end_line1);
    let (start2, end2) = content_range(side2.offsets, fragment.start_line2, fragment.end_line2);
    let (text1, origins1) = side1.filtered(start1, end1);
    let (text2, origins2) = side2.filtered(start2, end2);
    let words = compare_words_checked(
        &text1,
        &text2,
        ComparisonPolicy::Default,
        config.verify_iterables,
        cancel,
    )?;

    let base1 = fragment.offsets.start_offset1;
    let base2 = fragment.offsets.start_offset2;
    Ok(words
        .iter()
        .map(|w| {
            let (s1, e1) = to_original(&origins1, start1, w.start_offset1, w.end_offset1);
            let (s2, e2) = to_original(&origins2, start2, w.start_offset2, w.end_offset2);
            DiffFragment {
                start_offset1: s1 - base1,
                end_offset1: e1 - base1,
                start_offset2: s2 - base2,
                end_offset2: e2 - base2,
            }
        })
        .collect())
}

/// Map a filtered range back to original offsets. Empty ranges stick to the
/// end of the preceding kept byte.
fn to_original(origins: &[usize], content_start: usize, start: usize, end: usize) -> (usize, usize) {
    let after = |p: usize| if p == 0 { content_start } else { origins[p - 1] + 1 };
    if start == end {
        let offset = after(start);
        (offset, offset)
    } else {
        (origins[start], after(end))
    }
}
