use crate::line_numbers::LineNumbers;
use crate::myers::{self, Edit};
use crate::normalize::{HighlightedLine, Token};
use crate::tween::{FullTween, Tween};
use serde::Serialize;

/// How a line moves between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    /// Only in the next state.
    Enter,
    /// Only in the previous state.
    Exit,
    /// In both states.
    Stay,
}

/// A line after diffing, positioned in one or both states.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLine {
    pub tokens: Vec<Token>,
    pub line_number: Tween<usize>,
    pub index: Tween<usize>,
    pub movement: Movement,
    pub enter_index: Option<usize>,
    pub exit_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedCode {
    pub lines: Vec<MergedLine>,
    pub enter_count: usize,
    pub exit_count: usize,
}

/// Aligns the lines of both states. Each entry holds the line index in the
/// states the line exists in.
///
/// ```
/// use codeshift::differ::diff;
/// use codeshift::Tween;
///
/// let prev = ["a", "b"];
/// let next = ["b", "c"];
/// assert_eq!(diff(&prev, &next), vec![
///     Tween::prev_only(0),
///     Tween::both(1, 0),
///     Tween::next_only(1),
/// ]);
/// ```
pub fn diff<T: Eq>(prev: &[T], next: &[T]) -> Vec<Tween<usize>> {
    myers::diff(prev, next)
        .into_iter()
        .map(|edit| match edit {
            Edit::Delete(i) => Tween::prev_only(i),
            Edit::Insert(j) => Tween::next_only(j),
            Edit::Equal(i, j) => Tween::both(i, j),
        })
        .collect()
}

/// Classifies every line as staying, entering or exiting and ranks the
/// entering and exiting lines in order.
pub fn merge_lines(
    texts: &FullTween<Vec<String>>,
    lines: &FullTween<Vec<HighlightedLine>>,
    line_numbers: &FullTween<LineNumbers>,
) -> MergedCode {
    let mut enter_count = 0;
    let mut exit_count = 0;
    let merged = diff(&texts.prev, &texts.next)
        .into_iter()
        .filter_map(|index| {
            let line = match (index.prev, index.next) {
                (Some(p), None) => {
                    exit_count += 1;
                    MergedLine {
                        tokens: lines.prev[p].tokens.clone(),
                        line_number: Tween::new(line_numbers.prev.number_at(p), None),
                        index,
                        movement: Movement::Exit,
                        enter_index: None,
                        exit_index: Some(exit_count - 1),
                    }
                }
                (None, Some(n)) => {
                    enter_count += 1;
                    MergedLine {
                        tokens: lines.next[n].tokens.clone(),
                        line_number: Tween::new(None, line_numbers.next.number_at(n)),
                        index,
                        movement: Movement::Enter,
                        enter_index: Some(enter_count - 1),
                        exit_index: None,
                    }
                }
                (Some(p), Some(n)) => MergedLine {
                    tokens: lines.prev[p].tokens.clone(),
                    line_number: Tween::new(
                        line_numbers.prev.number_at(p),
                        line_numbers.next.number_at(n),
                    ),
                    index,
                    movement: Movement::Stay,
                    enter_index: None,
                    exit_index: None,
                },
                (None, None) => return None,
            };
            Some(line)
        })
        .collect();

    MergedCode {
        lines: merged,
        enter_count,
        exit_count,
    }
}
