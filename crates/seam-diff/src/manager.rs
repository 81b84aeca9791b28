//! The comparison facade.

use seam_types::{
    CancellationToken, CharComparisonMode, ComparisonConfig, ComparisonPolicy, ComparisonResult,
    DiffFragment, HighlightPolicy, LineFragment, Range,
};

use crate::blocks::compare_explicit_blocks;
use crate::by_char::compare_chars_checked;
use crate::by_word::compare_words_checked;
use crate::fragments::{compare_lines, compare_lines_inner, process_blocks, squash};
use crate::ignored::{compare_lines_with_ignored_ranges, IgnoredRangesInput, IgnoredRangesOutcome};
use crate::policy_filter::is_equals;

/// Entry point for all comparisons, carrying the engine configuration.
///
/// A manager is cheap to clone and holds no state besides its
/// [`ComparisonConfig`]; all operations are pure.
///
/// ```
/// use seam_diff::ComparisonManager;
/// use seam_types::{CancellationToken, ComparisonPolicy};
///
/// let manager = ComparisonManager::default();
/// let fragments = manager
///     .compare_lines("a\nb\n", "a\nc\n", ComparisonPolicy::Default, &CancellationToken::new())
///     .unwrap();
/// assert_eq!(fragments.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComparisonManager {
    config: ComparisonConfig,
}

impl ComparisonManager {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn is_equals(&self, text1: &str, text2: &str, policy: ComparisonPolicy) -> bool {
        is_equals(text1, text2, policy)
    }

    pub fn compare_chars(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        mode: CharComparisonMode,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<DiffFragment>> {
        compare_chars_checked(text1, text2, policy, mode, self.config.verify_iterables, cancel)
    }

    pub fn compare_words(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<DiffFragment>> {
        compare_words_checked(text1, text2, policy, self.config.verify_iterables, cancel)
    }

    pub fn compare_lines(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<LineFragment>> {
        compare_lines(text1, text2, policy, &self.config, cancel)
    }

    pub fn compare_lines_inner(
        &self,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<LineFragment>> {
        compare_lines_inner(text1, text2, policy, &self.config, cancel)
    }

    pub fn squash(&self, fragments: Vec<LineFragment>) -> Vec<LineFragment> {
        squash(fragments)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn process_blocks(
        &self,
        fragments: Vec<LineFragment>,
        text1: &str,
        text2: &str,
        policy: ComparisonPolicy,
        trim: bool,
        squash: bool,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<LineFragment>> {
        process_blocks(fragments, text1, text2, policy, trim, squash, &self.config, cancel)
    }

    pub fn compare_explicit_blocks(
        &self,
        text1: &str,
        text2: &str,
        blocks: &[Range],
        highlight: HighlightPolicy,
        policy: ComparisonPolicy,
        cancel: &CancellationToken,
    ) -> ComparisonResult<Vec<LineFragment>> {
        compare_explicit_blocks(text1, text2, blocks, highlight, policy, &self.config, cancel)
    }

    pub fn compare_lines_with_ignored_ranges(
        &self,
        input: &IgnoredRangesInput<'_>,
        cancel: &CancellationToken,
    ) -> ComparisonResult<IgnoredRangesOutcome> {
        compare_lines_with_ignored_ranges(input, &self.config, cancel)
    }
}
