use proptest::prelude::*;
use seam_diff::{is_equals, ComparisonManager};
use seam_types::{
    CancellationToken, CharComparisonMode, ComparisonConfig, ComparisonPolicy, DiffFragment,
};
use similar::{capture_diff_slices, Algorithm, DiffOp};

fn manager() -> ComparisonManager {
    ComparisonManager::new(ComparisonConfig::verifying())
}

/// Short texts over a small alphabet, so that repeated tokens and
/// whitespace-only differences are common.
fn text() -> impl Strategy<Value = String> {
    "[ab \t\n{}]{0,24}"
}

fn policy() -> impl Strategy<Value = ComparisonPolicy> {
    prop::sample::select(ComparisonPolicy::ALL.to_vec())
}

/// Fragments are non-empty, ordered and never touch on both sides.
fn check_shape(fragments: &[DiffFragment], len1: usize, len2: usize) -> Result<(), TestCaseError> {
    let mut previous: Option<&DiffFragment> = None;
    for f in fragments {
        prop_assert!(!f.is_empty(), "empty fragment {:?}", f);
        prop_assert!(f.end_offset1 <= len1 && f.end_offset2 <= len2);
        if let Some(p) = previous {
            prop_assert!(p.end_offset1 <= f.start_offset1 && p.end_offset2 <= f.start_offset2);
            prop_assert!(
                p.end_offset1 < f.start_offset1 || p.end_offset2 < f.start_offset2,
                "touching fragments {:?} {:?}",
                p,
                f
            );
        }
        previous = Some(f);
    }
    Ok(())
}

/// Under the default policy the text between fragments is identical on both
/// sides.
fn check_coverage(fragments: &[DiffFragment], text1: &str, text2: &str) -> Result<(), TestCaseError> {
    let (mut last1, mut last2) = (0, 0);
    for f in fragments {
        prop_assert_eq!(&text1[last1..f.start_offset1], &text2[last2..f.start_offset2]);
        last1 = f.end_offset1;
        last2 = f.end_offset2;
    }
    prop_assert_eq!(&text1[last1..], &text2[last2..]);
    Ok(())
}

proptest! {
    #[test]
    fn comparing_a_text_with_itself_finds_nothing(t in text(), policy in policy()) {
        let manager = manager();
        let cancel = CancellationToken::new();
        for mode in [CharComparisonMode::Raw, CharComparisonMode::Smart] {
            prop_assert!(manager.compare_chars(&t, &t, policy, mode, &cancel).unwrap().is_empty());
        }
        prop_assert!(manager.compare_words(&t, &t, policy, &cancel).unwrap().is_empty());
        prop_assert!(manager.compare_lines(&t, &t, policy, &cancel).unwrap().is_empty());
    }

    #[test]
    fn fragments_are_well_formed(t1 in text(), t2 in text(), policy in policy()) {
        let manager = manager();
        let cancel = CancellationToken::new();
        for mode in [CharComparisonMode::Raw, CharComparisonMode::Smart] {
            let chars = manager.compare_chars(&t1, &t2, policy, mode, &cancel).unwrap();
            check_shape(&chars, t1.len(), t2.len())?;
        }
        let words = manager.compare_words(&t1, &t2, policy, &cancel).unwrap();
        check_shape(&words, t1.len(), t2.len())?;

        let lines = manager.compare_lines(&t1, &t2, policy, &cancel).unwrap();
        for pair in lines.windows(2) {
            prop_assert!(pair[0].end_line1 <= pair[1].start_line1);
            prop_assert!(pair[0].end_line2 <= pair[1].start_line2);
            prop_assert!(!pair[0].touches(&pair[1]));
        }
        for f in &lines {
            prop_assert!(f.line_count1() + f.line_count2() > 0);
            if let Some(inner) = f.absolute_inner() {
                prop_assert!(!inner.is_empty());
                for w in inner {
                    prop_assert!(f.offsets.start_offset1 <= w.start_offset1);
                    prop_assert!(w.end_offset1 <= f.offsets.end_offset1);
                    prop_assert!(f.offsets.start_offset2 <= w.start_offset2);
                    prop_assert!(w.end_offset2 <= f.offsets.end_offset2);
                }
            }
        }
    }

    #[test]
    fn default_policy_fragments_cover_every_difference(t1 in text(), t2 in text()) {
        let manager = manager();
        let cancel = CancellationToken::new();
        let policy = ComparisonPolicy::Default;
        for mode in [CharComparisonMode::Raw, CharComparisonMode::Smart] {
            let chars = manager.compare_chars(&t1, &t2, policy, mode, &cancel).unwrap();
            check_coverage(&chars, &t1, &t2)?;
        }
        let words = manager.compare_words(&t1, &t2, policy, &cancel).unwrap();
        check_coverage(&words, &t1, &t2)?;
        let lines: Vec<DiffFragment> = manager
            .compare_lines_inner(&t1, &t2, policy, &cancel)
            .unwrap()
            .into_iter()
            .map(|f| f.offsets)
            .collect();
        check_coverage(&lines, &t1, &t2)?;
    }

    #[test]
    fn raw_char_comparison_is_minimal(t1 in "[abc]{0,16}", t2 in "[abc]{0,16}") {
        let fragments = manager()
            .compare_chars(&t1, &t2, ComparisonPolicy::Default, CharComparisonMode::Raw, &CancellationToken::new())
            .unwrap();
        let deleted: usize = fragments.iter().map(DiffFragment::len1).sum();
        let inserted: usize = fragments.iter().map(DiffFragment::len2).sum();

        let a: Vec<char> = t1.chars().collect();
        let b: Vec<char> = t2.chars().collect();
        let common: usize = capture_diff_slices(Algorithm::Myers, &a, &b)
            .iter()
            .map(|op| match op {
                DiffOp::Equal { len, .. } => *len,
                _ => 0,
            })
            .sum();
        prop_assert_eq!(deleted, a.len() - common);
        prop_assert_eq!(inserted, b.len() - common);
    }

    #[test]
    fn policies_are_ordered(t1 in text(), t2 in text()) {
        use ComparisonPolicy::*;
        if is_equals(&t1, &t2, Default) {
            prop_assert!(is_equals(&t1, &t2, TrimWhitespaces));
        }
        if is_equals(&t1, &t2, TrimWhitespaces) {
            prop_assert!(is_equals(&t1, &t2, IgnoreWhitespacesChunks));
        }
        if is_equals(&t1, &t2, IgnoreWhitespacesChunks) {
            prop_assert!(is_equals(&t1, &t2, IgnoreWhitespaces));
        }
    }

    #[test]
    fn trim_equal_texts_have_no_line_fragments(t in text(), pad in "[ \t]{0,3}") {
        let padded: String = t.split('\n').map(|line| format!("{pad}{line}{pad}")).collect::<Vec<_>>().join("\n");
        prop_assume!(is_equals(&t, &padded, ComparisonPolicy::TrimWhitespaces));
        let fragments = manager()
            .compare_lines(&t, &padded, ComparisonPolicy::TrimWhitespaces, &CancellationToken::new())
            .unwrap();
        prop_assert!(fragments.is_empty());
    }

    #[test]
    fn unequal_texts_always_have_fragments(t in text(), other in text()) {
        use ComparisonPolicy::*;
        let manager = manager();
        let cancel = CancellationToken::new();
        let doubled = t.replace(' ', "  ");
        for t2 in [doubled.as_str(), other.as_str()] {
            for policy in ComparisonPolicy::ALL {
                let words = manager.compare_words(&t, t2, policy, &cancel).unwrap();
                if !is_equals(&t, t2, policy) {
                    prop_assert!(!words.is_empty(), "{:?}: {:?} vs {:?}", policy, t, t2);
                } else if policy != IgnoreWhitespaces {
                    prop_assert!(words.is_empty(), "{:?}: {:?} vs {:?}", policy, t, t2);
                }
            }
            for policy in [Default, TrimWhitespaces] {
                if !is_equals(&t, t2, policy) {
                    let lines = manager.compare_lines(&t, t2, policy, &cancel).unwrap();
                    prop_assert!(!lines.is_empty(), "{:?}: {:?} vs {:?}", policy, t, t2);
                }
            }
        }
    }

    #[test]
    fn looser_policies_find_no_more_differences(t in text(), other in text()) {
        use ComparisonPolicy::*;
        let manager = manager();
        let cancel = CancellationToken::new();
        let doubled = t.replace(' ', "  ");
        for t2 in [doubled.as_str(), other.as_str()] {
            let no_words = |policy| manager.compare_words(&t, t2, policy, &cancel).unwrap().is_empty();
            let no_lines = |policy| manager.compare_lines(&t, t2, policy, &cancel).unwrap().is_empty();
            let words: Vec<bool> = [Default, TrimWhitespaces, IgnoreWhitespacesChunks, IgnoreWhitespaces]
                .into_iter()
                .map(no_words)
                .collect();
            let lines: Vec<bool> = [Default, TrimWhitespaces, IgnoreWhitespacesChunks]
                .into_iter()
                .map(no_lines)
                .collect();
            for pair in words.windows(2).chain(lines.windows(2)) {
                prop_assert!(!pair[0] || pair[1], "{:?} vs {:?}: {:?} {:?}", t, t2, words, lines);
            }
        }
    }
}
