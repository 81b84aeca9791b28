//! Line fragments: line comparison, squashing, block post-processing and
//! word-level inner detail.

use seam_types::{
    CancellationToken, ComparisonConfig, ComparisonError, ComparisonPolicy, ComparisonResult,
    DiffFragment, LineFragment, LineOffsets, Range,
};
use tracing::debug;

use crate::by_line::{compare_line_texts, line_fragment, split_lines, to_line_fragments};
use crate::by_word::compare_words_checked;
use crate::policy_filter::line_key;

/// Line differences without inner detail.
///
/// Fragments are maximal: two fragments never touch.
pub fn compare_lines_inner(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<LineFragment>> {
    let lines1 = split_lines(text1);
    let lines2 = split_lines(text2);
    let iterable = compare_line_texts(&lines1, &lines2, policy, config, cancel)?;
    let offsets1 = LineOffsets::from_text(text1);
    let offsets2 = LineOffsets::from_text(text2);
    Ok(to_line_fragments(iterable.changes(), &offsets1, &offsets2))
}

/// Line differences with word-level detail.
///
/// Fragments that change lines on both sides and span at most
/// `max_inner_fragment_lines` lines get `inner` word fragments; such a
/// fragment is dropped when its words turn out equal under the policy.
pub fn compare_lines(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<LineFragment>> {
    let fragments = squash(compare_lines_inner(text1, text2, policy, config, cancel)?);
    let result = attach_inner(fragments, text1, text2, policy, config, cancel)?;
    debug!(
        ?policy,
        len1 = text1.len(),
        len2 = text2.len(),
        fragments = result.len(),
        "compared lines"
    );
    Ok(result)
}

/// Merge fragments that touch on both sides. Merged fragments lose their
/// inner detail.
pub fn squash(fragments: Vec<LineFragment>) -> Vec<LineFragment> {
    let mut result: Vec<LineFragment> = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match result.last_mut() {
            Some(last) if last.touches(&fragment) => {
                last.end_line1 = fragment.end_line1;
                last.end_line2 = fragment.end_line2;
                last.offsets.end_offset1 = fragment.offsets.end_offset1;
                last.offsets.end_offset2 = fragment.offsets.end_offset2;
                last.inner = None;
            }
            _ => result.push(fragment),
        }
    }
    result
}

/// Post-process fragments computed elsewhere.
///
/// Offsets are rebuilt from the fragments' line ranges. With `trim`, leading
/// and trailing line pairs that are equal under the policy are cut off and
/// fragments left without lines are removed. With `squash`, touching
/// fragments are merged. Inner word fragments are recomputed for every
/// remaining fragment.
#[allow(clippy::too_many_arguments)]
pub fn process_blocks(
    fragments: Vec<LineFragment>,
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    trim: bool,
    squash_fragments: bool,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<LineFragment>> {
    let offsets1 = LineOffsets::from_text(text1);
    let offsets2 = LineOffsets::from_text(text2);
    if let Some(f) = fragments
        .iter()
        .find(|f| {
            f.start_line1 > f.end_line1
                || f.start_line2 > f.end_line2
                || f.end_line1 > offsets1.line_count()
                || f.end_line2 > offsets2.line_count()
        })
    {
        return Err(ComparisonError::InvalidArgument(format!(
            "fragment lines [{}, {}) - [{}, {}) are inverted or out of bounds",
            f.start_line1, f.end_line1, f.start_line2, f.end_line2
        )));
    }

    let lines1 = split_lines(text1);
    let lines2 = split_lines(text2);
    let mut rebuilt: Vec<LineFragment> = fragments
        .iter()
        .filter_map(|f| {
            let range = Range::new(f.start_line1, f.end_line1, f.start_line2, f.end_line2);
            if trim {
                trim_range(range, &lines1, &lines2, policy)
            } else {
                Some(range)
            }
        })
        .map(|range| line_fragment(&range, &offsets1, &offsets2))
        .collect();
    if squash_fragments {
        rebuilt = squash(rebuilt);
    }
    debug!(
        input = fragments.len(),
        output = rebuilt.len(),
        trim,
        squash = squash_fragments,
        "processed blocks"
    );
    attach_inner(rebuilt, text1, text2, policy, config, cancel)
}

/// `range` without equal leading and trailing line pairs, or `None` if
/// nothing is left.
fn trim_range(
    mut range: Range,
    lines1: &[&str],
    lines2: &[&str],
    policy: ComparisonPolicy,
) -> Option<Range> {
    let equal = |i: usize, j: usize| line_key(lines1[i], policy) == line_key(lines2[j], policy);
    while range.start1 < range.end1 && range.start2 < range.end2 && equal(range.start1, range.start2) {
        range.start1 += 1;
        range.start2 += 1;
    }
    while range.start1 < range.end1 && range.start2 < range.end2 && equal(range.end1 - 1, range.end2 - 1) {
        range.end1 -= 1;
        range.end2 -= 1;
    }
    (!range.is_empty()).then_some(range)
}

/// Attach word-level detail to every fragment that qualifies for it.
pub(crate) fn attach_inner(
    fragments: Vec<LineFragment>,
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<LineFragment>> {
    let offsets1 = LineOffsets::from_text(text1);
    let offsets2 = LineOffsets::from_text(text2);
    let mut result = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        cancel.check()?;
        let count1 = fragment.line_count1();
        let count2 = fragment.line_count2();
        if count1 == 0 || count2 == 0 || count1 + count2 > config.max_inner_fragment_lines {
            result.push(fragment.with_inner(None));
            continue;
        }

        let (content1, content1_end) = content_range(&offsets1, fragment.start_line1, fragment.end_line1);
        let (content2, content2_end) = content_range(&offsets2, fragment.start_line2, fragment.end_line2);
        let words = compare_words_checked(
            &text1[content1..content1_end],
            &text2[content2..content2_end],
            policy,
            config.verify_iterables,
            cancel,
        )?;
        if words.is_empty() {
            continue;
        }
        let shift1 = content1 - fragment.offsets.start_offset1;
        let shift2 = content2 - fragment.offsets.start_offset2;
        let inner: Vec<DiffFragment> = words.iter().map(|w| w.shifted(shift1, shift2)).collect();
        result.push(fragment.with_inner(Some(inner)));
    }
    Ok(result)
}

/// Byte range of the lines `[start, end)` without the final newline.
pub(crate) fn content_range(offsets: &LineOffsets, start: usize, end: usize) -> (usize, usize) {
    (offsets.line_start(start), offsets.line_end(end - 1))
}
