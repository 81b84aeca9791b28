//! Whitespace-aware equality under a [`ComparisonPolicy`].

use std::borrow::Cow;

use seam_types::ComparisonPolicy;

use crate::trim::is_whitespace;

/// Returns `true` if `text1` and `text2` are equal under `policy`.
///
/// `TrimWhitespaces` compares line by line: both texts must have the same
/// number of lines, and each pair must match once leading and trailing
/// whitespace is removed.
pub fn is_equals(text1: &str, text2: &str, policy: ComparisonPolicy) -> bool {
    match policy {
        ComparisonPolicy::Default => text1 == text2,
        ComparisonPolicy::TrimWhitespaces => text1
            .split('\n')
            .map(str::trim)
            .eq(text2.split('\n').map(str::trim)),
        ComparisonPolicy::IgnoreWhitespaces => non_whitespace(text1).eq(non_whitespace(text2)),
        ComparisonPolicy::IgnoreWhitespacesChunks => {
            text1.split_whitespace().eq(text2.split_whitespace())
        }
    }
}

/// Comparison key of a single line (without its newline) under `policy`.
///
/// Two lines are equal under the policy iff their keys are equal.
pub fn line_key(line: &str, policy: ComparisonPolicy) -> Cow<'_, str> {
    match policy {
        ComparisonPolicy::Default => Cow::Borrowed(line),
        ComparisonPolicy::TrimWhitespaces => Cow::Borrowed(line.trim()),
        ComparisonPolicy::IgnoreWhitespaces => {
            if line.chars().any(is_whitespace) {
                Cow::Owned(non_whitespace(line).collect())
            } else {
                Cow::Borrowed(line)
            }
        }
        ComparisonPolicy::IgnoreWhitespacesChunks => {
            Cow::Owned(line.split_whitespace().collect::<Vec<_>>().join(" "))
        }
    }
}

fn non_whitespace(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !is_whitespace(*c))
}
