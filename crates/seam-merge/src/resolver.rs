//! Automatic resolution of three-way conflicts at word granularity.
//!
//! Both sides are compared with the base word by word and their changes are
//! replayed onto the base in base order. Changes that collide resolve only
//! when both sides made the same edit. A literal attempt is made first and
//! retried ignoring whitespace.

use seam_diff::compare_words;
use seam_types::{CancellationToken, ComparisonPolicy, ComparisonResult, DiffFragment};
use tracing::debug;

const POLICIES: [ComparisonPolicy; 2] = [
    ComparisonPolicy::Default,
    ComparisonPolicy::IgnoreWhitespaces,
];

/// Merge `left` and `right` if none of their changes collide.
///
/// Changes touching at a base offset count as colliding. Returns
/// `Ok(None)` when the conflict cannot be resolved.
pub fn try_resolve(
    left: &str,
    base: &str,
    right: &str,
    cancel: &CancellationToken,
) -> ComparisonResult<Option<String>> {
    resolve(left, base, right, false, cancel)
}

/// Like [`try_resolve`], but only strictly overlapping changes, or two
/// insertions at the same base offset, collide.
///
/// Touching changes are interleaved in base order, which may produce a
/// plausible merge nobody wrote.
pub fn try_greedy_resolve(
    left: &str,
    base: &str,
    right: &str,
    cancel: &CancellationToken,
) -> ComparisonResult<Option<String>> {
    resolve(left, base, right, true, cancel)
}

fn resolve(
    left: &str,
    base: &str,
    right: &str,
    greedy: bool,
    cancel: &CancellationToken,
) -> ComparisonResult<Option<String>> {
    if left == right || right == base {
        return Ok(Some(left.to_string()));
    }
    if left == base {
        return Ok(Some(right.to_string()));
    }

    for policy in POLICIES {
        let left_changes = compare_words(base, left, policy, cancel)?;
        let right_changes = compare_words(base, right, policy, cancel)?;
        let merger = Merger {
            base,
            left,
            right,
            greedy,
        };
        if let Some(merged) = merger.apply(&left_changes, &right_changes) {
            debug!(
                ?policy,
                greedy,
                left = left_changes.len(),
                right = right_changes.len(),
                "resolved conflict"
            );
            return Ok(Some(merged));
        }
    }
    debug!(greedy, "conflict left unresolved");
    Ok(None)
}

/// Changes are `DiffFragment`s with side 1 in `base` and side 2 in the
/// changed text.
struct Merger<'a> {
    base: &'a str,
    left: &'a str,
    right: &'a str,
    greedy: bool,
}

impl Merger<'_> {
    fn apply(&self, left: &[DiffFragment], right: &[DiffFragment]) -> Option<String> {
        let mut result = String::with_capacity(self.base.len().max(self.left.len()));
        let mut pos = 0;
        let (mut i, mut j) = (0, 0);
        loop {
            let (change, text) = match (left.get(i), right.get(j)) {
                (Some(l), Some(r)) if self.collide(l, r) => {
                    if !self.identical(l, r) {
                        return None;
                    }
                    i += 1;
                    j += 1;
                    (l, self.left)
                }
                (Some(l), Some(r)) => {
                    if (l.start_offset1, l.end_offset1) <= (r.start_offset1, r.end_offset1) {
                        i += 1;
                        (l, self.left)
                    } else {
                        j += 1;
                        (r, self.right)
                    }
                }
                (Some(l), None) => {
                    i += 1;
                    (l, self.left)
                }
                (None, Some(r)) => {
                    j += 1;
                    (r, self.right)
                }
                (None, None) => break,
            };
            // An earlier change of the other side already consumed this base text.
            if change.start_offset1 < pos {
                return None;
            }
            result.push_str(&self.base[pos..change.start_offset1]);
            result.push_str(&text[change.start_offset2..change.end_offset2]);
            pos = change.end_offset1;
        }
        result.push_str(&self.base[pos..]);
        Some(result)
    }

    fn collide(&self, l: &DiffFragment, r: &DiffFragment) -> bool {
        if self.greedy {
            let overlap = l.start_offset1 < r.end_offset1 && r.start_offset1 < l.end_offset1;
            let same_insertion = l.len1() == 0 && r.len1() == 0 && l.start_offset1 == r.start_offset1;
            overlap || same_insertion
        } else {
            l.start_offset1 <= r.end_offset1 && r.start_offset1 <= l.end_offset1
        }
    }

    fn identical(&self, l: &DiffFragment, r: &DiffFragment) -> bool {
        l.start_offset1 == r.start_offset1
            && l.end_offset1 == r.end_offset1
            && self.left[l.start_offset2..l.end_offset2] == self.right[r.start_offset2..r.end_offset2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(left: &str, base: &str, right: &str) -> Option<String> {
        try_resolve(left, base, right, &CancellationToken::new()).unwrap()
    }

    fn greedy(left: &str, base: &str, right: &str) -> Option<String> {
        try_greedy_resolve(left, base, right, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn one_sided_change_wins() {
        assert_eq!(simple("x Y x", "x x x", "x x x").as_deref(), Some("x Y x"));
        assert_eq!(simple("x x x", "x x x", "x Y x").as_deref(), Some("x Y x"));
    }

    #[test]
    fn same_text_on_both_sides() {
        assert_eq!(simple("a b", "c", "a b").as_deref(), Some("a b"));
    }

    #[test]
    fn different_edits_of_the_same_word_conflict() {
        assert_eq!(simple("x Y x", "x x x", "x Z x"), None);
        assert_eq!(greedy("x Y x", "x x x", "x Z x"), None);
    }

    #[test]
    fn separate_edits_are_both_applied() {
        assert_eq!(
            simple("one 2 three", "one two three", "one two 3").as_deref(),
            Some("one 2 3")
        );
    }

    #[test]
    fn identical_edit_is_applied_once() {
        assert_eq!(
            simple("one 2 three four", "one two three four", "one 2 three 4").as_deref(),
            Some("one 2 three 4")
        );
    }

    #[test]
    fn greedy_interleaves_touching_changes() {
        assert_eq!(greedy("x x", "x X x", "x X Y x").as_deref(), Some("x Y x"));
        assert_eq!(simple("x x", "x X x", "x X Y x"), None);
    }

    #[test]
    fn cancellation_is_reported() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(
            try_resolve("a b", "a c", "d c", &cancel),
            Err(seam_types::ComparisonError::Cancelled)
        );
    }
}
