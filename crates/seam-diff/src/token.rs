//! Tokens: the comparable units shared by all granularities.

use seam_types::{DiffFragment, Range};

use crate::iterable::DiffIterable;

/// A comparable unit of text: its byte range and an interned comparison key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub key: u32,
}

impl Token {
    pub fn new(start: usize, end: usize, key: u32) -> Self {
        Self { start, end, key }
    }
}

pub fn keys(tokens: &[Token]) -> Vec<u32> {
    tokens.iter().map(|t| t.key).collect()
}

/// Byte range covered by `tokens[start..end]`.
///
/// An empty token range maps to the end of the preceding token, or to offset
/// zero when there is none.
pub fn byte_range(tokens: &[Token], start: usize, end: usize) -> (usize, usize) {
    if start < end {
        (tokens[start].start, tokens[end - 1].end)
    } else if start == 0 {
        (0, 0)
    } else {
        let offset = tokens[start - 1].end;
        (offset, offset)
    }
}

/// Translate token-space changes into byte fragments.
pub fn to_fragments(iterable: &DiffIterable, tokens1: &[Token], tokens2: &[Token]) -> Vec<DiffFragment> {
    iterable
        .changes()
        .iter()
        .map(|change| to_fragment(change, tokens1, tokens2))
        .collect()
}

fn to_fragment(change: &Range, tokens1: &[Token], tokens2: &[Token]) -> DiffFragment {
    let (start_offset1, end_offset1) = byte_range(tokens1, change.start1, change.end1);
    let (start_offset2, end_offset2) = byte_range(tokens2, change.start2, change.end2);
    DiffFragment {
        start_offset1,
        end_offset1,
        start_offset2,
        end_offset2,
    }
}
