use proptest::prelude::*;
use seam_types::LineOffsets;

fn text() -> impl Strategy<Value = String> {
    "[ab\n]{0,16}"
}

proptest! {
    #[test]
    fn lines_match_split(t in text()) {
        let offsets = LineOffsets::from_text(&t);
        let lines: Vec<&str> = t.split('\n').collect();
        prop_assert!(offsets.matches_text(&t));
        prop_assert_eq!(offsets.line_count(), lines.len());
        prop_assert_eq!(offsets.text_len(), t.len());
        for (i, line) in lines.iter().enumerate() {
            prop_assert_eq!(&t[offsets.line_start(i)..offsets.line_end(i)], *line);
            prop_assert_eq!(offsets.line_number(offsets.line_start(i)), i);
            prop_assert_eq!(offsets.line_number(offsets.line_end(i)), i);
        }
    }

    #[test]
    fn cutting_a_line_range_removes_exactly_those_lines(t in text(), a in 0usize..8, b in 0usize..8) {
        let offsets = LineOffsets::from_text(&t);
        let lines: Vec<&str> = t.split('\n').collect();
        let count = lines.len();
        let (start, end) = (a.min(b).min(count), a.max(b).min(count));

        let (from, to) = offsets.range_offsets(start, end);
        prop_assert!(from <= to && to <= t.len());
        let cut = format!("{}{}", &t[..from], &t[to..]);
        let kept: Vec<&str> = lines[..start].iter().chain(&lines[end..]).copied().collect();
        prop_assert_eq!(cut, kept.join("\n"));
    }
}
