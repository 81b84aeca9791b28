//! Word granularity.
//!
//! Text is split into maximal runs of word characters, punctuation and
//! whitespace; every newline is a token of its own and characters of
//! continuous scripts are one-character words. Words are aligned first and
//! the remaining tokens only fill the gaps, so a moved space never breaks
//! the match of two identical words.

use seam_types::{CancellationToken, ComparisonPolicy, ComparisonResult, DiffFragment, Range};
use tracing::debug;

use crate::iterable::DiffIterable;
use crate::optimizer::{optimize, Side};
use crate::policy_filter::is_equals;
use crate::sequence::{compare_smart, Enumerator};
use crate::token::{keys, to_fragments, Token};
use crate::trim::{is_continuous_script, is_punctuation, is_whitespace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Word,
    Punctuation,
    Whitespace,
    Newline,
}

impl Kind {
    fn of(c: char) -> Self {
        if c == '\n' {
            Kind::Newline
        } else if is_whitespace(c) {
            Kind::Whitespace
        } else if is_punctuation(c) {
            Kind::Punctuation
        } else {
            Kind::Word
        }
    }

    fn is_blank(self) -> bool {
        matches!(self, Kind::Whitespace | Kind::Newline)
    }
}

/// A word-level token before key interning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub start: usize,
    pub end: usize,
    pub kind: Kind,
}

/// Word-level differences between `text1` and `text2`.
pub fn compare_words(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<DiffFragment>> {
    compare_words_checked(text1, text2, policy, false, cancel)
}

pub(crate) fn compare_words_checked(
    text1: &str,
    text2: &str,
    policy: ComparisonPolicy,
    verify: bool,
    cancel: &CancellationToken,
) -> ComparisonResult<Vec<DiffFragment>> {
    let chunks1 = filter_chunks(split_chunks(text1), policy);
    let chunks2 = filter_chunks(split_chunks(text2), policy);

    let mut enumerator = Enumerator::new();
    let tokens1 = intern(text1, &chunks1, policy, &mut enumerator);
    let tokens2 = intern(text2, &chunks2, policy, &mut enumerator);
    let keys1 = keys(&tokens1);
    let keys2 = keys(&tokens2);

    let important1: Vec<bool> = chunks1.iter().map(|c| c.kind == Kind::Word).collect();
    let important2: Vec<bool> = chunks2.iter().map(|c| c.kind == Kind::Word).collect();
    let aligned = compare_smart(&keys1, &keys2, &important1, &important2, cancel)?;

    let optimized = optimize(&aligned, &keys1, &keys2, |side, start, _| {
        let chunks = match side {
            Side::One => &chunks1,
            Side::Two => &chunks2,
        };
        u32::from(!chunks[start].kind.is_blank())
    });
    let iterable = merge_across_spaces(&optimized, &chunks1);
    if verify {
        iterable.verify(&keys1, &keys2)?;
    }

    // Keys decide, except that whitespace may split words differently when it is ignored.
    let fragments: Vec<DiffFragment> = iterable
        .changes()
        .iter()
        .zip(to_fragments(&iterable, &tokens1, &tokens2))
        .filter(|(change, f)| {
            keys1[change.start1..change.end1] != keys2[change.start2..change.end2]
                && !(policy == ComparisonPolicy::IgnoreWhitespaces
                    && is_equals(
                        &text1[f.start_offset1..f.end_offset1],
                        &text2[f.start_offset2..f.end_offset2],
                        policy,
                    ))
        })
        .map(|(_, f)| f)
        .collect();
    debug!(
        ?policy,
        len1 = text1.len(),
        len2 = text2.len(),
        fragments = fragments.len(),
        "compared words"
    );
    Ok(fragments)
}

/// Split `text` into word, punctuation, whitespace and newline chunks.
pub(crate) fn split_chunks(text: &str) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    for (i, c) in text.char_indices() {
        let kind = Kind::of(c);
        let end = i + c.len_utf8();
        let joins = kind != Kind::Newline && !is_continuous_script(c);
        match chunks.last_mut() {
            Some(last) if joins && last.kind == kind && last.end == i && !last.single(text) => {
                last.end = end;
            }
            _ => chunks.push(Chunk { start: i, end, kind }),
        }
    }
    chunks
}

impl Chunk {
    /// Newlines and continuous-script characters never join a neighbour.
    fn single(&self, text: &str) -> bool {
        self.kind == Kind::Newline || text[self.start..self.end].chars().any(is_continuous_script)
    }
}

/// Drop or collapse the whitespace chunks the policy does not compare.
pub(crate) fn filter_chunks(chunks: Vec<Chunk>, policy: ComparisonPolicy) -> Vec<Chunk> {
    match policy {
        ComparisonPolicy::Default => chunks,
        ComparisonPolicy::TrimWhitespaces => {
            let at_line_edge = |i: usize| {
                let before = i.checked_sub(1).map(|j| chunks[j].kind);
                let after = chunks.get(i + 1).map(|c| c.kind);
                matches!(before, None | Some(Kind::Newline)) || matches!(after, None | Some(Kind::Newline))
            };
            chunks
                .iter()
                .enumerate()
                .filter(|&(i, c)| c.kind != Kind::Whitespace || !at_line_edge(i))
                .map(|(_, c)| *c)
                .collect()
        }
        ComparisonPolicy::IgnoreWhitespaces => {
            chunks.into_iter().filter(|c| !c.kind.is_blank()).collect()
        }
        ComparisonPolicy::IgnoreWhitespacesChunks => {
            let mut result: Vec<Chunk> = Vec::with_capacity(chunks.len());
            let mut pending: Option<Chunk> = None;
            for chunk in chunks {
                if chunk.kind.is_blank() {
                    pending = Some(match pending {
                        Some(run) => Chunk {
                            end: chunk.end,
                            kind: if run.kind == Kind::Newline { Kind::Newline } else { chunk.kind },
                            ..run
                        },
                        None => chunk,
                    });
                    continue;
                }
                if let Some(run) = pending.take() {
                    if !result.is_empty() {
                        result.push(run);
                    }
                }
                result.push(chunk);
            }
            result
        }
    }
}

fn intern<'a>(
    text: &'a str,
    chunks: &[Chunk],
    policy: ComparisonPolicy,
    enumerator: &mut Enumerator<&'a str>,
) -> Vec<Token> {
    let collapse = policy == ComparisonPolicy::IgnoreWhitespacesChunks;
    chunks
        .iter()
        .map(|c| {
            let key = if collapse && c.kind.is_blank() {
                enumerator.enumerate(" ")
            } else {
                enumerator.enumerate(&text[c.start..c.end])
            };
            Token::new(c.start, c.end, key)
        })
        .collect()
}

/// Join changes separated only by in-line whitespace.
fn merge_across_spaces(iterable: &DiffIterable, chunks1: &[Chunk]) -> DiffIterable {
    let mut result: Vec<Range> = Vec::with_capacity(iterable.changes().len());
    for change in iterable.changes() {
        match result.last_mut() {
            Some(last)
                if chunks1[last.end1..change.start1]
                    .iter()
                    .all(|c| c.kind == Kind::Whitespace) =>
            {
                last.end1 = change.end1;
                last.end2 = change.end2;
            }
            _ => result.push(*change),
        }
    }
    DiffIterable::new(result, iterable.length1(), iterable.length2())
}
