//! Line granularity.
//!
//! Lines are aligned in two passes. The first pass ignores whitespace
//! entirely and only lets "important" lines (those with enough non-blank
//! characters) drive the alignment; short lines such as `}` or blank lines
//! fill the gaps afterwards. The second pass corrects the result under the
//! requested policy: pairs that only matched because whitespace was ignored
//! become changes again, and changed regions are re-aligned with the
//! policy's own keys.

use seam_types::{
    CancellationToken, ComparisonConfig, ComparisonPolicy, ComparisonResult, DiffFragment,
    LineFragment, LineOffsets, Range,
};
use tracing::trace;

use crate::iterable::{ChangeBuilder, DiffIterable};
use crate::optimizer::{optimize, Side};
use crate::policy_filter::line_key;
use crate::sequence::{compare_smart, diff_keys, Enumerator};
use crate::trim::count_non_whitespace;

/// Split `text` at `'\n'`. A trailing newline yields a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Align two line sequences under `policy`.
pub fn compare_line_texts<S: AsRef<str>>(
    lines1: &[S],
    lines2: &[S],
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<DiffIterable> {
    let ignored = interned_keys(lines1, lines2, ComparisonPolicy::IgnoreWhitespaces);
    let important1: Vec<bool> = lines1
        .iter()
        .map(|l| is_important(l.as_ref(), config))
        .collect();
    let important2: Vec<bool> = lines2
        .iter()
        .map(|l| is_important(l.as_ref(), config))
        .collect();
    let aligned = compare_smart(&ignored.0, &ignored.1, &important1, &important2, cancel)?;
    if config.verify_iterables {
        aligned.verify(&ignored.0, &ignored.1)?;
    }

    let (iterable, keys) = if policy == ComparisonPolicy::IgnoreWhitespaces {
        (aligned, ignored)
    } else {
        let keys = interned_keys(lines1, lines2, policy);
        let corrected = correct(&aligned, &keys.0, &keys.1, cancel)?;
        trace!(
            ?policy,
            before = aligned.changes().len(),
            after = corrected.changes().len(),
            "corrected line alignment"
        );
        (corrected, keys)
    };
    finish(iterable, keys, lines1, lines2, config)
}

fn finish<S: AsRef<str>>(
    iterable: DiffIterable,
    (keys1, keys2): (Vec<u32>, Vec<u32>),
    lines1: &[S],
    lines2: &[S],
    config: &ComparisonConfig,
) -> ComparisonResult<DiffIterable> {
    let optimized = optimize(&iterable, &keys1, &keys2, |side, _, end| {
        let line = match side {
            Side::One => lines1[end - 1].as_ref(),
            Side::Two => lines2[end - 1].as_ref(),
        };
        if line.trim().is_empty() {
            2
        } else if !is_important(line, config) {
            1
        } else {
            0
        }
    });
    if config.verify_iterables {
        optimized.verify(&keys1, &keys2)?;
    }
    Ok(optimized)
}

fn is_important(line: &str, config: &ComparisonConfig) -> bool {
    count_non_whitespace(line) > config.unimportant_line_char_count
}

fn interned_keys<S: AsRef<str>>(
    lines1: &[S],
    lines2: &[S],
    policy: ComparisonPolicy,
) -> (Vec<u32>, Vec<u32>) {
    let mut enumerator = Enumerator::new();
    let keys1 = lines1
        .iter()
        .map(|l| enumerator.enumerate(line_key(l.as_ref(), policy)))
        .collect();
    let keys2 = lines2
        .iter()
        .map(|l| enumerator.enumerate(line_key(l.as_ref(), policy)))
        .collect();
    (keys1, keys2)
}

/// Re-check an alignment under stricter keys.
///
/// Matched pairs whose keys differ become changes; every changed region is
/// aligned again with the stricter keys.
fn correct(
    aligned: &DiffIterable,
    keys1: &[u32],
    keys2: &[u32],
    cancel: &CancellationToken,
) -> ComparisonResult<DiffIterable> {
    let mut builder = ChangeBuilder::new(keys1.len(), keys2.len());
    let (mut last1, mut last2) = (0, 0);
    let fill = |builder: &mut ChangeBuilder, change: Range| -> ComparisonResult<()> {
        if change.len1() > 0 && change.len2() > 0 {
            let gap = diff_keys(
                &keys1[change.start1..change.end1],
                &keys2[change.start2..change.end2],
                cancel,
            )?;
            builder.mark_unchanged_of(&gap, change.start1, change.start2);
        }
        Ok(())
    };
    for range in aligned.unchanged() {
        fill(&mut builder, Range::new(last1, range.start1, last2, range.start2))?;
        for k in 0..range.len1() {
            if keys1[range.start1 + k] == keys2[range.start2 + k] {
                builder.mark_equal(range.start1 + k, range.start2 + k, 1);
            }
        }
        last1 = range.end1;
        last2 = range.end2;
    }
    fill(&mut builder, Range::new(last1, keys1.len(), last2, keys2.len()))?;
    Ok(builder.finish())
}

/// Convert line-space changes into [`LineFragment`]s with byte offsets.
pub fn to_line_fragments(
    changes: &[Range],
    offsets1: &LineOffsets,
    offsets2: &LineOffsets,
) -> Vec<LineFragment> {
    changes
        .iter()
        .map(|change| line_fragment(change, offsets1, offsets2))
        .collect()
}

pub(crate) fn line_fragment(change: &Range, offsets1: &LineOffsets, offsets2: &LineOffsets) -> LineFragment {
    let (start_offset1, end_offset1) = offsets1.range_offsets(change.start1, change.end1);
    let (start_offset2, end_offset2) = offsets2.range_offsets(change.start2, change.end2);
    LineFragment {
        start_line1: change.start1,
        end_line1: change.end1,
        start_line2: change.start2,
        end_line2: change.end2,
        offsets: DiffFragment {
            start_offset1,
            end_offset1,
            start_offset2,
            end_offset2,
        },
        inner: None,
    }
}
