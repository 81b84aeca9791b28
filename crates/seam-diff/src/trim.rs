//! Character classification and boundary helpers.
//!
//! Every comparison granularity classifies characters the same way: a
//! character is whitespace, punctuation, or part of a word. Scripts written
//! without spaces (CJK, Thai, ...) are treated as one-character words so that
//! a changed ideograph does not swallow the whole sentence.

/// Returns `true` if `c` is one of ``(){}[],./?`~!@#$%^&*-=+|\;:'"<>``.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ','
            | '.'
            | '/'
            | '?'
            | '`'
            | '~'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | '-'
            | '='
            | '+'
            | '|'
            | '\\'
            | ';'
            | ':'
            | '\''
            | '"'
            | '<'
            | '>'
    )
}

/// Unicode whitespace, newlines included.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Returns `true` for characters of scripts written without word separators.
pub fn is_continuous_script(c: char) -> bool {
    matches!(
        c as u32,
        0x0E00..=0x0EFF       // Thai, Lao
            | 0x1780..=0x17FF // Khmer
            | 0x3040..=0x30FF // Hiragana, Katakana
            | 0x3400..=0x4DBF // CJK extension A
            | 0x4E00..=0x9FFF // CJK unified ideographs
            | 0xF900..=0xFAFF // CJK compatibility ideographs
            | 0x20000..=0x2FA1F
    )
}

/// Characters that make up words: anything that is neither whitespace nor punctuation.
pub fn is_word_char(c: char) -> bool {
    !is_whitespace(c) && !is_punctuation(c)
}

/// First offset in `[start, end)` that does not hold whitespace, or `end`.
pub fn trim_start(text: &str, start: usize, end: usize) -> usize {
    text[start..end]
        .char_indices()
        .find(|(_, c)| !is_whitespace(*c))
        .map_or(end, |(i, _)| start + i)
}

/// Offset just past the last non-whitespace character in `[start, end)`, or `start`.
pub fn trim_end(text: &str, start: usize, end: usize) -> usize {
    text[start..end]
        .char_indices()
        .rev()
        .find(|(_, c)| !is_whitespace(*c))
        .map_or(start, |(i, c)| start + i + c.len_utf8())
}

/// `[start, end)` without leading and trailing whitespace.
///
/// A range holding only whitespace collapses to `(end, end)`.
pub fn trim(text: &str, start: usize, end: usize) -> (usize, usize) {
    let trimmed_start = trim_start(text, start, end);
    if trimmed_start == end {
        return (end, end);
    }
    (trimmed_start, trim_end(text, trimmed_start, end))
}

/// Byte ranges of the leading and trailing whitespace of every line of `text`.
///
/// Newlines are never part of the returned ranges. Whitespace-only lines
/// produce a single range covering the whole line.
pub fn line_edge_whitespace(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut line_start = 0;
    for line in text.split('\n') {
        let line_end = line_start + line.len();
        let (content_start, content_end) = trim(text, line_start, line_end);
        if content_start > line_start {
            ranges.push((line_start, content_start));
        }
        if content_end < line_end && content_start < content_end {
            ranges.push((content_end, line_end));
        }
        line_start = line_end + 1;
    }
    ranges
}

/// Number of equal elements of `a[start1..end1]` and `b[start2..end2]`
/// counted forward from the starts.
pub fn expand_forward<T: PartialEq>(
    a: &[T],
    b: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize {
    a[start1..end1]
        .iter()
        .zip(&b[start2..end2])
        .take_while(|(x, y)| x == y)
        .count()
}

/// Number of equal elements of `a[start1..end1]` and `b[start2..end2]`
/// counted backward from the ends.
pub fn expand_backward<T: PartialEq>(
    a: &[T],
    b: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize {
    a[start1..end1]
        .iter()
        .rev()
        .zip(b[start2..end2].iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Number of non-whitespace characters in `text`.
pub fn count_non_whitespace(text: &str) -> usize {
    text.chars().filter(|c| !is_whitespace(*c)).count()
}
