use crate::annotations::{InlineAnnotation, InlineByLine};
use crate::differ::{MergedCode, MergedLine, Movement};
use crate::focus::{FocusSpec, LineFocus};
use crate::normalize::Token;
use crate::tween::{FullTween, Side, Tween};
use serde::Serialize;
use std::collections::BTreeSet;

/// Contiguous run of tokens sharing the same focus in both states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenGroup {
    pub tokens: Vec<Token>,
    pub focused: FullTween<bool>,
}

impl TokenGroup {
    /// Width in columns (chars).
    pub fn width(&self) -> usize {
        self.tokens.iter().map(Token::width).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusedLine {
    /// Position in the merged sequence, stable for the whole transition.
    pub key: usize,
    pub line_number: Tween<usize>,
    pub index: Tween<usize>,
    pub movement: Movement,
    pub enter_index: Option<usize>,
    pub exit_index: Option<usize>,
    /// Whether any part of the line is focused, per state.
    pub focused: FullTween<bool>,
    pub groups: Vec<TokenGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusedCode {
    pub lines: Vec<FocusedLine>,
    pub enter_count: usize,
    pub exit_count: usize,
    pub first_focused_line_number: FullTween<Option<usize>>,
    pub last_focused_line_number: FullTween<Option<usize>>,
}

/// Slices every line into token groups at focus and inline-annotation
/// column boundaries of both states.
pub fn split_by_focus(
    merged: MergedCode,
    focus: &FullTween<FocusSpec>,
    inline: &FullTween<InlineByLine>,
) -> FocusedCode {
    let lines: Vec<FocusedLine> = merged
        .lines
        .into_iter()
        .enumerate()
        .map(|(key, line)| split_line(key, line, focus, inline))
        .collect();

    let focused_numbers = |side: Side| {
        lines
            .iter()
            .filter(move |l| *l.focused.get(side))
            .filter_map(move |l| l.line_number.get(side).copied())
    };
    let first_focused_line_number = FullTween::from_fn(|side| focused_numbers(side).min());
    let last_focused_line_number = FullTween::from_fn(|side| focused_numbers(side).max());

    FocusedCode {
        lines,
        enter_count: merged.enter_count,
        exit_count: merged.exit_count,
        first_focused_line_number,
        last_focused_line_number,
    }
}

fn split_line(
    key: usize,
    line: MergedLine,
    focus: &FullTween<FocusSpec>,
    inline: &FullTween<InlineByLine>,
) -> FocusedLine {
    let line_focus: FullTween<Option<LineFocus>> = FullTween::from_fn(|side| {
        line.line_number
            .get(side)
            .and_then(|&n| focus.get(side).line_focus(n))
    });
    let annotations: FullTween<&[InlineAnnotation]> = FullTween::from_fn(|side| {
        line.line_number
            .get(side)
            .and_then(|n| inline.get(side).get(n))
            .map_or(&[][..], Vec::as_slice)
    });
    let width: usize = line.tokens.iter().map(Token::width).sum();

    let mut cuts = BTreeSet::new();
    let mut annotation_cuts = BTreeSet::new();
    for side in Side::BOTH {
        if let Some(focus) = line_focus.get(side) {
            for c in focus.columns() {
                cuts.insert(c.start - 1);
                cuts.insert(c.end);
            }
        }
        for a in annotations.get(side).iter() {
            annotation_cuts.insert(a.column_numbers.start - 1);
            annotation_cuts.insert(a.column_numbers.end);
        }
    }
    cuts.extend(annotation_cuts.iter().copied());

    let mut bounds = vec![0];
    bounds.extend(cuts.into_iter().filter(|&c| c > 0 && c < width));
    bounds.push(width);

    let mut groups: Vec<TokenGroup> = vec![];
    for (tokens, span) in slice_tokens(&line.tokens, &bounds)
        .into_iter()
        .zip(bounds.windows(2))
    {
        let (from, to) = (span[0], span[1]);
        let focused = FullTween::from_fn(|side| match line_focus.get(side) {
            Some(focus) if to > from => focus.covers(from, to),
            Some(focus) => matches!(focus, LineFocus::Whole),
            None => false,
        });
        match groups.last_mut() {
            Some(group) if group.focused == focused && !annotation_cuts.contains(&from) => {
                group.tokens.extend(tokens)
            }
            _ => groups.push(TokenGroup { tokens, focused }),
        }
    }

    let focused = FullTween::from_fn(|side| groups.iter().any(|g| *g.focused.get(side)));
    FocusedLine {
        key,
        line_number: line.line_number,
        index: line.index,
        movement: line.movement,
        enter_index: line.enter_index,
        exit_index: line.exit_index,
        focused,
        groups,
    }
}

/// Distributes the tokens over the segments delimited by `bounds`, splitting
/// any token that straddles a bound. Yields `bounds.len() - 1` segments.
fn slice_tokens(tokens: &[Token], bounds: &[usize]) -> Vec<Vec<Token>> {
    let segment_count = bounds.len() - 1;
    let mut segments: Vec<Vec<Token>> = vec![vec![]; segment_count];
    let mut segment = 0;
    let mut offset = 0;
    for token in tokens {
        let mut rest = token.clone();
        loop {
            let segment_end = bounds[segment + 1];
            let width = rest.width();
            if offset + width <= segment_end || segment + 1 == segment_count {
                offset += width;
                segments[segment].push(rest);
                if offset == segment_end && segment + 1 < segment_count {
                    segment += 1;
                }
                break;
            }
            let (left, right) = rest.split_at(segment_end - offset);
            segments[segment].push(left);
            offset = segment_end;
            segment += 1;
            rest = right;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{parse_annotations, AnnotationDescriptor};
    use crate::differ::merge_lines;
    use crate::line_numbers::LineNumbers;
    use crate::normalize::{line_texts, HighlightedLine};
    use proptest::prelude::*;
    use serde_json::json;

    fn highlighted(text: &str) -> HighlightedLine {
        // one token per whitespace-separated word, spaces kept in the tokens
        let mut tokens = vec![];
        let mut current = String::new();
        for c in text.chars() {
            current.push(c);
            if c == ' ' {
                tokens.push(Token::new(std::mem::take(&mut current), json!({"index": tokens.len()})));
            }
        }
        if !current.is_empty() {
            tokens.push(Token::new(current, json!({"index": tokens.len()})));
        }
        HighlightedLine::new(tokens)
    }

    fn split(
        prev: &[&str],
        next: &[&str],
        focus: (&str, &str),
        annotations: Tween<Vec<AnnotationDescriptor>>,
    ) -> FocusedCode {
        let lines = FullTween::new(
            prev.iter().map(|s| highlighted(s)).collect::<Vec<_>>(),
            next.iter().map(|s| highlighted(s)).collect::<Vec<_>>(),
        );
        let numbers = FullTween::new(
            LineNumbers::parse(None, prev.len()).unwrap(),
            LineNumbers::parse(None, next.len()).unwrap(),
        );
        let merged = merge_lines(&line_texts(&lines), &lines, &numbers);
        let focus = FullTween::new(
            FocusSpec::parse(focus.0).unwrap(),
            FocusSpec::parse(focus.1).unwrap(),
        );
        let parsed = parse_annotations(&annotations).unwrap();
        split_by_focus(merged, &focus, &parsed.inline)
    }

    fn texts(line: &FocusedLine) -> Vec<String> {
        line.groups
            .iter()
            .map(|g| g.tokens.iter().map(|t| t.content.as_str()).collect())
            .collect()
    }

    fn flags(line: &FocusedLine) -> Vec<(bool, bool)> {
        line.groups
            .iter()
            .map(|g| (g.focused.prev, g.focused.next))
            .collect()
    }

    proptest! {
        #[test]
        fn test_token_reconstruction(
            text in "[a-c é]{0,20}",
            start in 1usize..25,
            len in 0usize..10,
            other in 1usize..25,
        ) {
            let prev_focus = format!("1[{}:{}]", start, start + len);
            let next_focus = format!("1[{}]", other);
            let code = split(
                &[text.as_str()],
                &[text.as_str()],
                (prev_focus.as_str(), next_focus.as_str()),
                Tween::default(),
            );
            let line = &code.lines[0];
            let joined: String = texts(line).concat();
            prop_assert_eq!(joined, text.clone());
            for group in &line.groups {
                for token in &group.tokens {
                    prop_assert!(!token.content.is_empty() || text.is_empty());
                }
            }
        }

        #[test]
        fn test_no_focus_means_unfocused(lines in prop::collection::vec("[ab ]{0,8}", 0..6)) {
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            let code = split(&lines, &lines, ("", ""), Tween::default());
            for line in &code.lines {
                prop_assert_eq!(line.focused, FullTween::new(false, false));
                for group in &line.groups {
                    prop_assert_eq!(group.focused, FullTween::new(false, false));
                }
            }
            prop_assert_eq!(code.first_focused_line_number, FullTween::new(None, None));
        }
    }

    #[test]
    fn test_whole_line_focus() {
        let code = split(&["a b", "c d"], &["a b", "c d"], ("2", "1:2"), Tween::default());
        assert_eq!(texts(&code.lines[0]), vec!["a b"]);
        assert_eq!(flags(&code.lines[0]), vec![(false, true)]);
        assert_eq!(flags(&code.lines[1]), vec![(true, true)]);
        assert_eq!(code.first_focused_line_number, FullTween::new(Some(2), Some(1)));
        assert_eq!(code.last_focused_line_number, FullTween::new(Some(2), Some(2)));
    }

    #[test]
    fn test_column_focus_splits_tokens() {
        let code = split(&["let x = 1"], &["let x = 1"], ("1[5:5]", "1[5:9]"), Tween::default());
        let line = &code.lines[0];
        assert_eq!(texts(line), vec!["let ", "x", " = 1"]);
        assert_eq!(flags(line), vec![(false, false), (true, true), (false, true)]);
        // "x " was one token, its style survives the split
        assert_eq!(line.groups[1].tokens[0].style, json!({"index": 1}));
        assert_eq!(line.groups[2].tokens[0].style, json!({"index": 1}));
    }

    #[test]
    fn test_adjacent_focus_ranges_merge() {
        let code = split(&["abcdef"], &["abcdef"], ("1[1:2,3:4]", "1[1:4]"), Tween::default());
        assert_eq!(texts(&code.lines[0]), vec!["abcd", "ef"]);
    }

    #[test]
    fn test_annotation_bounds_split() {
        let annotations = Tween::next_only(vec![AnnotationDescriptor::new("1[2:3]")]);
        let code = split(&["abcdef"], &["abcdef"], ("", ""), annotations);
        assert_eq!(texts(&code.lines[0]), vec!["a", "bc", "def"]);
        assert_eq!(flags(&code.lines[0]), vec![(false, false); 3]);
    }

    #[test]
    fn test_focus_follows_line_numbers_per_state() {
        // "b" is line 2 before and line 1 after
        let code = split(&["a", "b"], &["b"], ("2", "1"), Tween::default());
        assert_eq!(code.lines[0].movement, Movement::Exit);
        assert_eq!(code.lines[0].focused, FullTween::new(false, false));
        assert_eq!(code.lines[1].focused, FullTween::new(true, true));
    }

    #[test]
    fn test_empty_line() {
        let code = split(&[""], &[""], ("1", "1[1:2]"), Tween::default());
        let line = &code.lines[0];
        assert_eq!(line.groups.len(), 1);
        assert_eq!(flags(line), vec![(true, false)]);
    }

    #[test]
    fn test_columns_past_line_end() {
        let code = split(&["ab"], &["ab"], ("1[2:9]", ""), Tween::default());
        assert_eq!(texts(&code.lines[0]), vec!["a", "b"]);
        assert_eq!(flags(&code.lines[0]), vec![(false, false), (true, false)]);
    }

    #[test]
    fn test_columns_entirely_past_line_end_leave_line_unfocused() {
        let code = split(&["ab", "cd"], &["ab", "cd"], ("1[5:9],2", "1[3]"), Tween::default());
        assert_eq!(flags(&code.lines[0]), vec![(false, false)]);
        assert_eq!(code.lines[0].focused, FullTween::new(false, false));
        assert_eq!(code.first_focused_line_number, FullTween::new(Some(2), None));
        assert_eq!(code.last_focused_line_number, FullTween::new(Some(2), None));
    }

    #[test]
    fn test_focus_range_far_past_last_line() {
        let code = split(&["a", "b"], &["a"], ("2:4294967295", "1:20000000"), Tween::default());
        assert_eq!(code.lines[0].focused, FullTween::new(false, true));
        assert_eq!(code.lines[1].focused, FullTween::new(true, false));
        assert_eq!(code.last_focused_line_number, FullTween::new(Some(2), Some(1)));
    }
}
