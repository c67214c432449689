use super::{InlineAnnotation, InlineByLine, MultilineAnnotation};
use crate::differ::Movement;
use crate::splitter::{FocusedLine, TokenGroup};
use crate::tween::{FullTween, Side, Tween};
use serde::Serialize;
use tracing::debug;

/// Consecutive token groups, wrapped by the inline annotation that spans
/// them exactly, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTokenGroups {
    pub groups: Vec<TokenGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<InlineAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedLine {
    pub key: usize,
    pub line_number: Tween<usize>,
    pub index: Tween<usize>,
    pub movement: Movement,
    pub enter_index: Option<usize>,
    pub exit_index: Option<usize>,
    pub focused: FullTween<bool>,
    /// Token groups of the line as laid out in each state it exists in.
    pub annotated_groups: Tween<Vec<AnnotatedTokenGroups>>,
}

/// Lines sharing the same multiline annotation, or none.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGroup {
    pub annotation: Option<MultilineAnnotation>,
    pub lines: Vec<AnnotatedLine>,
}

/// Binds inline annotations to the token groups they span, per state.
///
/// An annotation whose column range does not line up with group
/// boundaries is dropped.
pub fn annotate_inline(lines: Vec<FocusedLine>, inline: &FullTween<InlineByLine>) -> Vec<AnnotatedLine> {
    lines
        .into_iter()
        .map(|line| {
            let annotated_groups = line.line_number.as_ref().map(|&number, side| {
                let annotations = inline.get(side).get(&number).map_or(&[][..], Vec::as_slice);
                bind_groups(&line.groups, annotations, number, side)
            });
            AnnotatedLine {
                key: line.key,
                line_number: line.line_number,
                index: line.index,
                movement: line.movement,
                enter_index: line.enter_index,
                exit_index: line.exit_index,
                focused: line.focused,
                annotated_groups,
            }
        })
        .collect()
}

fn bind_groups(
    groups: &[TokenGroup],
    annotations: &[InlineAnnotation],
    line_number: usize,
    side: Side,
) -> Vec<AnnotatedTokenGroups> {
    let mut result: Vec<AnnotatedTokenGroups> = vec![];
    let mut bound = vec![false; annotations.len()];
    let mut column = 1;
    let mut i = 0;
    while i < groups.len() {
        let hit = annotations
            .iter()
            .enumerate()
            .filter(|(k, a)| !bound[*k] && a.column_numbers.start == column)
            .find_map(|(k, a)| run_end(groups, i, column, a.column_numbers.end).map(|j| (k, j)));
        match hit {
            Some((k, j)) => {
                bound[k] = true;
                let run = groups[i..j].to_vec();
                column += run.iter().map(TokenGroup::width).sum::<usize>();
                result.push(AnnotatedTokenGroups {
                    groups: run,
                    annotation: Some(annotations[k].clone()),
                });
                i = j;
            }
            None => {
                column += groups[i].width();
                match result.last_mut() {
                    Some(last) if last.annotation.is_none() => last.groups.push(groups[i].clone()),
                    _ => result.push(AnnotatedTokenGroups {
                        groups: vec![groups[i].clone()],
                        annotation: None,
                    }),
                }
                i += 1;
            }
        }
    }

    for (annotation, _) in annotations.iter().zip(&bound).filter(|(_, b)| !**b) {
        debug!(
            ?side,
            line_number,
            start = annotation.column_numbers.start,
            end = annotation.column_numbers.end,
            "dropping inline annotation that matches no token groups"
        );
    }
    result
}

/// One past the last group of the run that starts at group `from` (column
/// `column`) and ends exactly at column `end`.
fn run_end(groups: &[TokenGroup], from: usize, column: usize, end: usize) -> Option<usize> {
    let mut last = column - 1;
    for (j, group) in groups.iter().enumerate().skip(from) {
        last += group.width();
        if last == end {
            return Some(j + 1);
        }
        if last > end {
            return None;
        }
    }
    None
}

/// Groups consecutive lines by the multiline annotation covering them,
/// independently for each state. Every line appears in both groupings; lines
/// missing from a state join whatever group surrounds them.
pub fn annotate_multiline(
    lines: &[AnnotatedLine],
    multiline: &FullTween<Vec<MultilineAnnotation>>,
) -> FullTween<Vec<LineGroup>> {
    FullTween::from_fn(|side| group_lines(lines, multiline.get(side), side))
}

fn group_lines(lines: &[AnnotatedLine], annotations: &[MultilineAnnotation], side: Side) -> Vec<LineGroup> {
    let mut groups: Vec<LineGroup> = vec![];
    // declaration position of the annotation covering the last group
    let mut current: Option<Option<usize>> = None;
    let mut used = vec![false; annotations.len()];
    for line in lines {
        let Some(&number) = line.line_number.get(side) else {
            // a line missing from this state never ends the current group
            match groups.last_mut() {
                Some(group) => group.lines.push(line.clone()),
                None => {
                    groups.push(LineGroup {
                        annotation: None,
                        lines: vec![line.clone()],
                    });
                    current = Some(None);
                }
            }
            continue;
        };
        let annotation = annotations
            .iter()
            .position(|a| a.line_numbers.contains(number));
        match groups.last_mut() {
            Some(group) if current == Some(annotation) => group.lines.push(line.clone()),
            _ => {
                if let Some(k) = annotation {
                    used[k] = true;
                }
                groups.push(LineGroup {
                    annotation: annotation.map(|k| annotations[k].clone()),
                    lines: vec![line.clone()],
                });
                current = Some(annotation);
            }
        }
    }

    for (annotation, _) in annotations.iter().zip(&used).filter(|(_, u)| !**u) {
        debug!(
            ?side,
            start = annotation.line_numbers.start,
            end = annotation.line_numbers.end,
            "multiline annotation covers no lines"
        );
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{parse_annotations, AnnotationDescriptor};
    use crate::differ::merge_lines;
    use crate::focus::FocusSpec;
    use crate::line_numbers::LineNumbers;
    use crate::normalize::{line_texts, HighlightedLine};
    use crate::splitter::split_by_focus;
    use serde_json::json;

    struct Setup<'a> {
        prev: &'a [&'a str],
        next: &'a [&'a str],
        prev_numbers: Option<&'a str>,
        focus: (&'a str, &'a str),
        annotations: Tween<Vec<AnnotationDescriptor>>,
    }

    impl<'a> Setup<'a> {
        fn new(prev: &'a [&'a str], next: &'a [&'a str]) -> Self {
            Setup {
                prev,
                next,
                prev_numbers: None,
                focus: ("", ""),
                annotations: Tween::default(),
            }
        }

        fn run(self) -> (Vec<AnnotatedLine>, FullTween<Vec<LineGroup>>) {
            let lines = FullTween::new(
                self.prev.iter().map(|&s| HighlightedLine::from(s)).collect::<Vec<_>>(),
                self.next.iter().map(|&s| HighlightedLine::from(s)).collect::<Vec<_>>(),
            );
            let numbers = FullTween::new(
                LineNumbers::parse(self.prev_numbers, self.prev.len()).unwrap(),
                LineNumbers::parse(None, self.next.len()).unwrap(),
            );
            let merged = merge_lines(&line_texts(&lines), &lines, &numbers);
            let focus = FullTween::new(
                FocusSpec::parse(self.focus.0).unwrap(),
                FocusSpec::parse(self.focus.1).unwrap(),
            );
            let parsed = parse_annotations(&self.annotations).unwrap();
            let focused = split_by_focus(merged, &focus, &parsed.inline);
            let annotated = annotate_inline(focused.lines, &parsed.inline);
            let groups = annotate_multiline(&annotated, &parsed.multiline);
            (annotated, groups)
        }
    }

    fn content(entry: &AnnotatedTokenGroups) -> String {
        entry
            .groups
            .iter()
            .flat_map(|g| g.tokens.iter().map(|t| t.content.as_str()))
            .collect()
    }

    #[test]
    fn test_inline_binds_exact_span() {
        let mut setup = Setup::new(&["let answer = 42"], &["let answer = 42"]);
        setup.annotations = Tween::prev_only(vec![
            AnnotationDescriptor::new("1[5:10]").with_data(json!("name"))
        ]);
        let (lines, _) = setup.run();
        let prev = lines[0].annotated_groups.prev.as_ref().unwrap();
        assert_eq!(prev.len(), 3);
        assert_eq!(content(&prev[1]), "answer");
        assert_eq!(prev[1].annotation.as_ref().unwrap().data, json!("name"));
        assert!(prev[0].annotation.is_none());
        assert!(prev[2].annotation.is_none());

        // annotations are not carried over to the other state
        let next = lines[0].annotated_groups.next.as_ref().unwrap();
        assert!(next.iter().all(|entry| entry.annotation.is_none()));
        assert_eq!(next.iter().map(content).collect::<String>(), "let answer = 42");
    }

    #[test]
    fn test_inline_spans_focus_boundaries() {
        let mut setup = Setup::new(&["abcdef"], &["abcdef"]);
        setup.focus = ("1[3:4]", "");
        setup.annotations = Tween::prev_only(vec![AnnotationDescriptor::new("1[2:5]")]);
        let (lines, _) = setup.run();
        let prev = lines[0].annotated_groups.prev.as_ref().unwrap();
        assert_eq!(prev.len(), 3);
        assert_eq!(prev[1].groups.len(), 3);
        assert_eq!(content(&prev[1]), "bcde");
        assert!(prev[1].annotation.is_some());
    }

    #[test]
    fn test_inline_on_missing_line_is_dropped() {
        let mut setup = Setup::new(&["a", "b"], &["a"]);
        setup.annotations = Tween::next_only(vec![AnnotationDescriptor::new("2[1]")]);
        let (lines, _) = setup.run();
        assert!(lines
            .iter()
            .filter_map(|l| l.annotated_groups.next.as_ref())
            .flatten()
            .all(|entry| entry.annotation.is_none()));
    }

    #[test]
    fn test_overlapping_inline_keeps_first() {
        let mut setup = Setup::new(&["abcd"], &["abcd"]);
        setup.annotations = Tween::next_only(vec![
            AnnotationDescriptor::new("1[1:2]").with_data(json!(1)),
            AnnotationDescriptor::new("1[1:2]").with_data(json!(2)),
        ]);
        let (lines, _) = setup.run();
        let next = lines[0].annotated_groups.next.as_ref().unwrap();
        let bound: Vec<_> = next.iter().filter_map(|e| e.annotation.as_ref()).collect();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].data, json!(1));
    }

    #[test]
    fn test_exit_line_has_no_next_groups() {
        let (lines, _) = Setup::new(&["a", "b"], &["a"]).run();
        assert_eq!(lines[1].movement, Movement::Exit);
        assert!(lines[1].annotated_groups.prev.is_some());
        assert!(lines[1].annotated_groups.next.is_none());
    }

    #[test]
    fn test_multiline_uses_visible_numbers() {
        let mut setup = Setup::new(&["a", "b", "c"], &["a", "b", "c"]);
        setup.prev_numbers = Some("5:7");
        setup.annotations = Tween::prev_only(vec![AnnotationDescriptor::new("6:6")]);
        let (_, groups) = setup.run();
        let prev = &groups.prev;
        assert_eq!(prev.len(), 3);
        assert!(prev[0].annotation.is_none());
        assert_eq!(prev[1].lines.len(), 1);
        assert_eq!(prev[1].lines[0].line_number.prev, Some(6));
        assert!(prev[1].annotation.is_some());
        assert!(prev[2].annotation.is_none());
        assert_eq!(groups.next.len(), 1);
        assert_eq!(groups.next[0].lines.len(), 3);
    }

    #[test]
    fn test_adjacent_multiline_annotations_split_groups() {
        let mut setup = Setup::new(&["a", "b", "c", "d"], &["a", "b", "c", "d"]);
        setup.annotations = Tween::next_only(vec![
            AnnotationDescriptor::new("1:2"),
            AnnotationDescriptor::new("3:4"),
        ]);
        let (_, groups) = setup.run();
        let sizes: Vec<usize> = groups.next.iter().map(|g| g.lines.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
        assert_ne!(groups.next[0].annotation, groups.next[1].annotation);
    }

    #[test]
    fn test_absent_lines_stay_in_current_group() {
        let mut setup = Setup::new(&["a", "x", "b"], &["a", "b"]);
        setup.annotations = Tween::next_only(vec![AnnotationDescriptor::new("1:2")]);
        let (_, groups) = setup.run();
        assert_eq!(groups.next.len(), 1);
        assert!(groups.next[0].annotation.is_some());
        let keys: Vec<usize> = groups.next[0].lines.iter().map(|l| l.key).collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(groups.prev.len(), 1);
        assert_eq!(groups.prev[0].lines.len(), 3);
    }

    #[test]
    fn test_leading_absent_lines() {
        let mut setup = Setup::new(&["x", "a"], &["a"]);
        setup.annotations = Tween::next_only(vec![AnnotationDescriptor::new("1")]);
        let (_, groups) = setup.run();
        assert_eq!(groups.next.len(), 2);
        assert!(groups.next[0].annotation.is_none());
        assert_eq!(groups.next[0].lines[0].movement, Movement::Exit);
        assert!(groups.next[1].annotation.is_some());
    }
}
