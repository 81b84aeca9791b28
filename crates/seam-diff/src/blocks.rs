//! Line comparison restricted to caller-supplied blocks.
//!
//! Callers that already know which line ranges correspond (for example the
//! hunks of a patch) pass them as blocks; lines outside of blocks are never
//! compared, and alignment never crosses a block boundary.

use seam_types::{
    CancellationToken, ComparisonConfig, ComparisonError, ComparisonPolicy, ComparisonResult,
    HighlightPolicy, LineFragment, LineOffsets, Range,
};
use tracing::debug;

use crate::by_line::{compare_line_texts, line_fragment, split_lines};
use crate::fragments::attach_inner;

/// Compare `text1` and `text2` block by block.
///
/// Blocks are line ranges, ordered and non-overlapping on both sides. The
/// result is in document coordinates. With [`HighlightPolicy::ByWord`] inner
/// word fragments are attached the same way [`crate::compare_lines`] does.
pub fn compare_explicit_blocks(
    text1: &str,
    text2: &str,
    blocks: &[Range],
    highlight: HighlightPolicy,
    policy: ComparisonPolicy,
    config: &ComparisonConfig,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<LineFragment>> {
    let lines1 = split_lines(text1);
    let lines2 = split_lines(text2);
    validate_blocks(blocks, lines1.len(), lines2.len())?;

    let offsets1 = LineOffsets::from_text(text1);
    let offsets2 = LineOffsets::from_text(text2);
    let mut fragments = Vec::new();
    for block in blocks {
        let iterable = compare_line_texts(
            &lines1[block.start1..block.end1],
            &lines2[block.start2..block.end2],
            policy,
            config,
            cancel,
        )?;
        fragments.extend(iterable.changes().iter().map(|change| {
            let document = Range::new(
                change.start1 + block.start1,
                change.end1 + block.start1,
                change.start2 + block.start2,
                change.end2 + block.start2,
            );
            line_fragment(&document, &offsets1, &offsets2)
        }));
    }
    debug!(
        blocks = blocks.len(),
        fragments = fragments.len(),
        ?highlight,
        ?policy,
        "compared explicit blocks"
    );

    match highlight {
        HighlightPolicy::ByLine => Ok(fragments),
        HighlightPolicy::ByWord => attach_inner(fragments, text1, text2, policy, config, cancel),
    }
}

fn validate_blocks(blocks: &[Range], count1: usize, count2: usize) -> ComparisonResult<()> {
    let (mut last1, mut last2) = (0, 0);
    for block in blocks {
        if block.start1 > block.end1 || block.start2 > block.end2 {
            return Err(ComparisonError::InvalidArgument(format!("inverted block {block:?}")));
        }
        if block.end1 > count1 || block.end2 > count2 {
            return Err(ComparisonError::InvalidArgument(format!(
                "block {block:?} exceeds line counts {count1}/{count2}"
            )));
        }
        if block.start1 < last1 || block.start2 < last2 {
            return Err(ComparisonError::InvalidArgument(format!(
                "block {block:?} overlaps or precedes its predecessor"
            )));
        }
        last1 = block.end1;
        last2 = block.end2;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(
        text1: &str,
        text2: &str,
        blocks: &[Range],
        highlight: HighlightPolicy,
        policy: ComparisonPolicy,
    ) -> ComparisonResult<Vec<LineFragment>> {
        compare_explicit_blocks(
            text1,
            text2,
            blocks,
            highlight,
            policy,
            &ComparisonConfig::verifying(),
            &CancellationToken::new(),
        )
    }

    fn spans(fragments: &[LineFragment]) -> Vec<(usize, usize, usize, usize)> {
        fragments
            .iter()
            .map(|f| (f.start_line1, f.end_line1, f.start_line2, f.end_line2))
            .collect()
    }

    #[test]
    fn changes_are_remapped_into_document_coordinates() {
        let text1 = "head\nalpha\nbeta\ntail";
        let text2 = "head\nalpha\ngamma\ntail";
        let blocks = [Range::new(1, 3, 1, 3)];
        let fragments = compare(text1, text2, &blocks, HighlightPolicy::ByLine, ComparisonPolicy::Default).unwrap();
        assert_eq!(spans(&fragments), vec![(2, 3, 2, 3)]);
        let f = &fragments[0];
        assert_eq!(&text1[f.offsets.start_offset1..f.offsets.end_offset1], "beta\n");
        assert!(f.inner.is_none());
    }

    #[test]
    fn lines_outside_blocks_are_ignored() {
        let text1 = "one\nsame";
        let text2 = "two\nsame";
        let blocks = [Range::new(1, 2, 1, 2)];
        let fragments = compare(text1, text2, &blocks, HighlightPolicy::ByLine, ComparisonPolicy::Default).unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn alignment_does_not_cross_blocks() {
        // "moved" cannot be matched with the line in the other block.
        let text1 = "moved\nx\ny";
        let text2 = "x\ny\nmoved";
        let blocks = [Range::new(0, 1, 0, 1), Range::new(1, 3, 1, 3)];
        let fragments = compare(text1, text2, &blocks, HighlightPolicy::ByLine, ComparisonPolicy::Default).unwrap();
        assert_eq!(spans(&fragments), vec![(0, 1, 0, 1), (1, 2, 1, 1), (3, 3, 2, 3)]);
    }

    #[test]
    fn by_word_attaches_inner_fragments() {
        let text1 = "a\nlet x = 1;";
        let text2 = "a\nlet y = 1;";
        let blocks = [Range::new(0, 2, 0, 2)];
        let fragments = compare(text1, text2, &blocks, HighlightPolicy::ByWord, ComparisonPolicy::Default).unwrap();
        assert_eq!(spans(&fragments), vec![(1, 2, 1, 2)]);
        assert_eq!(fragments[0].inner.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn whitespace_changes_follow_policy() {
        let text1 = "a\n  b  \nc";
        let text2 = "a\nb\nc";
        let blocks = [Range::new(0, 3, 0, 3)];
        assert!(compare(text1, text2, &blocks, HighlightPolicy::ByWord, ComparisonPolicy::TrimWhitespaces)
            .unwrap()
            .is_empty());
        assert_eq!(
            spans(&compare(text1, text2, &blocks, HighlightPolicy::ByLine, ComparisonPolicy::Default).unwrap()),
            vec![(1, 2, 1, 2)]
        );
    }

    #[test]
    fn invalid_blocks_are_rejected() {
        let text = "a\nb\nc";
        for blocks in [
            vec![Range::new(2, 1, 0, 0)],
            vec![Range::new(0, 4, 0, 1)],
            vec![Range::new(1, 2, 1, 2), Range::new(0, 1, 2, 3)],
        ] {
            assert!(matches!(
                compare(text, text, &blocks, HighlightPolicy::ByLine, ComparisonPolicy::Default),
                Err(ComparisonError::InvalidArgument(_))
            ));
        }
    }
}
