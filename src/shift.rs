use crate::annotations::{
    annotate_inline, annotate_multiline, parse_annotations, AnnotatedLine, AnnotationDescriptor,
    LineGroup, MultilineAnnotation,
};
use crate::config::ShiftConfig;
use crate::differ::{merge_lines, Movement};
use crate::error::Result;
use crate::focus::FocusSpec;
use crate::line_numbers::LineNumbers;
use crate::normalize::{code_text, line_texts, HighlightedLine};
use crate::splitter::split_by_focus;
use crate::tween::{stagger, vertical_interval, Easing, FullTween, Side, Tween, TweenParams};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Everything needed to plan one transition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ShiftInput {
    pub highlighted_lines: FullTween<Vec<HighlightedLine>>,
    pub focus: Tween<String>,
    pub line_nums: Tween<String>,
    pub annotations: Tween<Vec<AnnotationDescriptor>>,
    pub lang: String,
}

impl ShiftInput {
    pub fn new(prev: Vec<HighlightedLine>, next: Vec<HighlightedLine>) -> Self {
        ShiftInput {
            highlighted_lines: FullTween::new(prev, next),
            ..Default::default()
        }
    }

    pub fn with_focus(mut self, prev: Option<&str>, next: Option<&str>) -> Self {
        self.focus = Tween::new(prev.map(str::to_string), next.map(str::to_string));
        self
    }

    pub fn with_line_nums(mut self, prev: Option<&str>, next: Option<&str>) -> Self {
        self.line_nums = Tween::new(prev.map(str::to_string), next.map(str::to_string));
        self
    }

    pub fn with_annotations(
        mut self,
        prev: Option<Vec<AnnotationDescriptor>>,
        next: Option<Vec<AnnotationDescriptor>>,
    ) -> Self {
        self.annotations = Tween::new(prev, next);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// A line with the tweens that place it at every point of the transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweenedLine {
    #[serde(flatten)]
    pub line: AnnotatedLine,
    /// Horizontal offset, in line widths.
    pub tween_x: TweenParams,
    /// Vertical position, in lines.
    pub tween_y: TweenParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweenedLineGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<MultilineAnnotation>,
    pub lines: Vec<TweenedLine>,
}

/// The resolved plan of a transition, ready to be sampled by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeShift {
    pub groups: FullTween<Vec<TweenedLineGroup>>,
    pub first_focused_line_number: FullTween<Option<usize>>,
    pub last_focused_line_number: FullTween<Option<usize>>,
    pub vertical_interval: [f64; 2],
    pub line_count: FullTween<usize>,
    pub max_line_number: FullTween<usize>,
    pub enter_count: usize,
    pub exit_count: usize,
    pub code: FullTween<String>,
    pub lang: String,
}

impl CodeShift {
    /// Lines of one state's grouping, in order.
    pub fn lines(&self, side: Side) -> impl Iterator<Item = &TweenedLine> {
        self.groups.get(side).iter().flat_map(|g| g.lines.iter())
    }
}

/// Plans the transition between the two states of `input`.
///
/// All ranges are validated before any diffing, so a malformed line-number
/// range, focus string or annotation target fails the whole call.
///
/// # Examples
///
/// ```
/// use codeshift::{parse, HighlightedLine, Movement, ShiftConfig, ShiftInput, Side};
///
/// let prev: Vec<HighlightedLine> = ["a", "b", "c"].into_iter().map(Into::into).collect();
/// let next: Vec<HighlightedLine> = ["a", "x", "c"].into_iter().map(Into::into).collect();
/// let shift = parse(&ShiftInput::new(prev, next), &ShiftConfig::default()).unwrap();
///
/// assert_eq!(shift.vertical_interval, [0.25, 0.75]);
/// let moves: Vec<Movement> = shift.lines(Side::Prev).map(|l| l.line.movement).collect();
/// assert_eq!(moves, vec![Movement::Stay, Movement::Exit, Movement::Enter, Movement::Stay]);
/// ```
pub fn parse(input: &ShiftInput, config: &ShiftConfig) -> Result<CodeShift> {
    let lines = &input.highlighted_lines;

    let line_numbers = lines.as_ref().try_map(|lines, side| {
        LineNumbers::parse(input.line_nums.get(side).map(String::as_str), lines.len())
    })?;
    let focus = FullTween::from_fn(|side| input.focus.get(side).map(String::as_str))
        .try_map(|focus, _| FocusSpec::parse_optional(focus))?;
    let annotations = parse_annotations(&input.annotations)?;

    let texts = line_texts(lines);
    let merged = merge_lines(&texts, lines, &line_numbers);
    trace!(
        prev_lines = texts.prev.len(),
        next_lines = texts.next.len(),
        enter_count = merged.enter_count,
        exit_count = merged.exit_count,
        "merged lines"
    );

    let focused = split_by_focus(merged, &focus, &annotations.inline);
    let enter_count = focused.enter_count;
    let exit_count = focused.exit_count;
    let annotated = annotate_inline(focused.lines, &annotations.inline);
    let line_count = FullTween::from_fn(|side| {
        annotated
            .iter()
            .filter(|l| l.line_number.get(side).is_some())
            .count()
    });
    let line_groups = annotate_multiline(&annotated, &annotations.multiline);

    let interval = vertical_interval(enter_count, exit_count);
    trace!(?interval, "vertical interval");
    let groups: FullTween<Vec<TweenedLineGroup>> = line_groups.map(|groups, _| {
        groups
            .into_iter()
            .map(|group| add_tweens(group, interval, enter_count, exit_count))
            .collect()
    });

    let max_line_number = line_numbers
        .as_ref()
        .map(|numbers, _| numbers.last().unwrap_or(0).max(config.min_max_line_number));

    Ok(CodeShift {
        groups,
        first_focused_line_number: focused.first_focused_line_number,
        last_focused_line_number: focused.last_focused_line_number,
        vertical_interval: interval,
        line_count,
        max_line_number,
        enter_count,
        exit_count,
        code: code_text(&texts),
        lang: input.lang.clone(),
    })
}

fn add_tweens(
    group: LineGroup,
    interval: [f64; 2],
    enter_count: usize,
    exit_count: usize,
) -> TweenedLineGroup {
    TweenedLineGroup {
        annotation: group.annotation,
        lines: group
            .lines
            .into_iter()
            .map(|line| tween_line(line, interval, enter_count, exit_count))
            .collect(),
    }
}

/// Assigns the vertical and horizontal tweens of a line.
///
/// Staying lines only move vertically, inside `[start_y, end_y]`. Exiting
/// lines slide out to the left before `start_y`, entering lines slide in
/// from the right after `end_y`, each in its own slice of that time.
pub fn tween_line(
    line: AnnotatedLine,
    interval: [f64; 2],
    enter_count: usize,
    exit_count: usize,
) -> TweenedLine {
    let [start_y, end_y] = interval;
    let index = line.index.as_ref().map(|&i, _| i as f64);
    let (tween_x, tween_y) = match line.movement {
        Movement::Exit => (
            TweenParams::Interpolated {
                extremes: [0.0, -1.0],
                interval: stagger([0.0, start_y], line.exit_index.unwrap_or(0), exit_count),
                ease: Easing::EaseInQuad,
            },
            TweenParams::fixed(index.prev.unwrap_or_default()),
        ),
        Movement::Enter => (
            TweenParams::Interpolated {
                extremes: [1.0, 0.0],
                interval: stagger([end_y, 1.0], line.enter_index.unwrap_or(0), enter_count),
                ease: Easing::EaseOutQuad,
            },
            TweenParams::fixed(index.next.unwrap_or_default()),
        ),
        Movement::Stay => (
            TweenParams::fixed(0.0),
            TweenParams::Interpolated {
                extremes: [
                    index.prev.unwrap_or_default(),
                    index.next.unwrap_or_default(),
                ],
                interval,
                ease: Easing::EaseInOutCubic,
            },
        ),
    };
    TweenedLine {
        line,
        tween_x,
        tween_y,
    }
}
