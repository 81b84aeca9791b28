//! Character granularity.

use seam_types::{CancellationToken, CharComparisonMode, ComparisonPolicy, ComparisonResult, DiffFragment};
use tracing::debug;

use crate::optimizer::{optimize, Side};
use crate::sequence::{compare_smart, diff};
use crate::token::{keys, to_fragments, Token};
use crate::trim::{is_whitespace, is_word_char, line_edge_whitespace};

/// Key of the token standing for a collapsed whitespace run.
const SEPARATOR: u32 = ' ' as u32;

/// Character-level differences between `text1` and `text2`.
///
/// `Raw` returns a minimal alignment of the characters. `Smart` aligns
/// non-whitespace characters first and then moves pure insertions and
/// deletions onto word boundaries where possible.
pub fn compare_chars(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    mode: CharComparisonMode,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<DiffFragment>> {
    compare_chars_checked(text1, text2, policy, mode, false, cancel)
}

pub(crate) fn compare_chars_checked(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    mode: CharComparisonMode,
    verify: bool,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<DiffFragment>> {
    let tokens1 = tokenize(text1, policy);
    let tokens2 = tokenize(text2, policy);
    let keys1 = keys(&tokens1);
    let keys2 = keys(&tokens2);

    let iterable = match mode {
        CharComparisonMode::Raw => diff(&keys1, &keys2, cancel)?,
        CharComparisonMode::Smart => {
            let important1: Vec<bool> = keys1.iter().map(|&k| is_important(k)).collect();
            let important2: Vec<bool> = keys2.iter().map(|&k| is_important(k)).collect();
            let aligned = compare_smart(&keys1, &keys2, &important1, &important2, cancel)?;
            optimize(&aligned, &keys1, &keys2, |side, start, end| {
                let (text, tokens) = match side {
                    Side::One => (text1, &tokens1),
                    Side::Two => (text2, &tokens2),
                };
                boundary_score(text, tokens, start, end)
            })
        }
    };
    if verify {
        iterable.verify(&keys1, &keys2)?;
    }

    let fragments = to_fragments(&iterable, &tokens1, &tokens2);
    debug!(
        ?policy,
        ?mode,
        len1 = text1.len(),
        len2 = text2.len(),
        fragments = fragments.len(),
        "compared chars"
    );
    Ok(fragments)
}

/// The character tokens of `text` that take part in a comparison under `policy`.
pub(crate) fn tokenize(text: &str, policy: ComparisonPolicy) -> Vec<Token> {
    let char_token = |(i, c): (usize, char)| Token::new(i, i + c.len_utf8(), c as u32);
    match policy {
        ComparisonPolicy::Default => text.char_indices().map(char_token).collect(),
        ComparisonPolicy::TrimWhitespaces => {
            let edges = line_edge_whitespace(text);
            let mut edge = 0;
            let mut tokens = Vec::with_capacity(text.len());
            for (i, c) in text.char_indices() {
                while edge < edges.len() && edges[edge].1 <= i {
                    edge += 1;
                }
                if edge < edges.len() && edges[edge].0 <= i {
                    continue;
                }
                tokens.push(char_token((i, c)));
            }
            tokens
        }
        ComparisonPolicy::IgnoreWhitespaces => text
            .char_indices()
            .filter(|(_, c)| !is_whitespace(*c))
            .map(char_token)
            .collect(),
        ComparisonPolicy::IgnoreWhitespacesChunks => {
            let mut tokens = Vec::with_capacity(text.len());
            let mut run_start = None;
            for (i, c) in text.char_indices() {
                if is_whitespace(c) {
                    run_start.get_or_insert(i);
                    continue;
                }
                if let Some(start) = run_start.take() {
                    if !tokens.is_empty() {
                        tokens.push(Token::new(start, i, SEPARATOR));
                    }
                }
                tokens.push(char_token((i, c)));
            }
            tokens
        }
    }
}

fn is_important(key: u32) -> bool {
    char::from_u32(key).is_some_and(|c| !is_whitespace(c))
}

/// Number of block ends (0, 1 or 2) that do not cut through a word.
fn boundary_score(text: &str, tokens: &[Token], start: usize, end: usize) -> u32 {
    u32::from(is_word_boundary(text, tokens[start].start))
        + u32::from(is_word_boundary(text, tokens[end - 1].end))
}

fn is_word_boundary(text: &str, offset: usize) -> bool {
    let before = text[..offset].chars().next_back();
    let after = text[offset..].chars().next();
    !matches!((before, after), (Some(b), Some(a)) if is_word_char(b) && is_word_char(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComparisonPolicy::*;

    fn fragment(s1: usize, e1: usize, s2: usize, e2: usize) -> DiffFragment {
        DiffFragment::new(s1, e1, s2, e2).unwrap()
    }

    fn chars(text1: &str, text2: &str, policy: ComparisonPolicy, mode: CharComparisonMode) -> Vec<DiffFragment> {
        compare_chars_checked(text1, text2, policy, mode, true, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn raw_and_smart_modes() {
        assert_eq!(
            chars("  a", "a  ", Default, CharComparisonMode::Raw),
            vec![fragment(0, 0, 0, 1), fragment(2, 3, 3, 3)]
        );
        assert_eq!(
            chars("  a", "a  ", Default, CharComparisonMode::Smart),
            vec![fragment(0, 2, 0, 0), fragment(3, 3, 1, 3)]
        );
    }

    #[test]
    fn identical_and_empty_texts() {
        assert!(chars("abc", "abc", Default, CharComparisonMode::Smart).is_empty());
        assert!(chars("", "", Default, CharComparisonMode::Raw).is_empty());
        assert_eq!(
            chars("", "ab", Default, CharComparisonMode::Raw),
            vec![fragment(0, 0, 0, 2)]
        );
    }

    #[test]
    fn multibyte_offsets() {
        assert_eq!(
            chars("añb", "a€b", Default, CharComparisonMode::Raw),
            vec![fragment(1, 3, 1, 4)]
        );
    }

    #[test]
    fn policies_hide_whitespace() {
        assert!(chars(" a\n b ", "a\nb", TrimWhitespaces, CharComparisonMode::Smart).is_empty());
        assert!(!chars("a b", "ab", TrimWhitespaces, CharComparisonMode::Smart).is_empty());
        assert!(chars("a b\nc", "abc", IgnoreWhitespaces, CharComparisonMode::Smart).is_empty());
        assert!(chars(" a  b ", "a\tb", IgnoreWhitespacesChunks, CharComparisonMode::Smart).is_empty());
        assert_eq!(
            chars("a b", "ab", IgnoreWhitespacesChunks, CharComparisonMode::Raw),
            vec![fragment(1, 2, 1, 1)]
        );
    }

    #[test]
    fn smart_mode_prefers_word_boundaries() {
        // " b" after "a" and "b " after "a " both keep words intact.
        let fragments = chars("a c", "a b c", Default, CharComparisonMode::Smart);
        assert_eq!(fragments.len(), 1);
        let f = fragments[0];
        assert!(f.is_insertion());
        assert_eq!(&"a b c"[f.start_offset2..f.end_offset2].trim(), &"b");
    }

    #[test]
    fn chunk_tokens_drop_outer_runs() {
        let tokens = tokenize("  a  b ", IgnoreWhitespacesChunks);
        assert_eq!(
            tokens,
            vec![
                Token::new(2, 3, 'a' as u32),
                Token::new(3, 5, SEPARATOR),
                Token::new(5, 6, 'b' as u32),
            ]
        );
    }

    #[test]
    fn trim_tokens_keep_inner_whitespace() {
        let tokens = tokenize(" a b \n", TrimWhitespaces);
        let offsets: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        assert_eq!(offsets, vec![1, 2, 3, 5]);
    }
}
