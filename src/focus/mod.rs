//! Parsing of focus strings such as `"1,3:5,7[2:4,9]"`.
//!
//! A focus string is a comma-separated list of selectors. A selector is a
//! line number `N`, a line range `N:M`, or a single line with column ranges
//! `N[c1:c2,c3]`. All bounds are 1-based and inclusive.

mod types;
pub use types::*;

use crate::error::{Error, Result};
use std::str::FromStr;

/// A parsed focus string. An empty spec focuses nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusSpec {
    selectors: Vec<Selector>,
}

impl FocusSpec {
    /// Parses a focus string. Blank input yields an empty spec.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeshift::focus::{FocusSpec, LineFocus, ColumnRange};
    ///
    /// let spec = FocusSpec::parse("2:3,5[4:6]").unwrap();
    /// assert_eq!(spec.line_focus(2), Some(LineFocus::Whole));
    /// assert_eq!(
    ///     spec.line_focus(5),
    ///     Some(LineFocus::Columns(vec![ColumnRange { start: 4, end: 6 }]))
    /// );
    /// assert_eq!(spec.line_focus(4), None);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(FocusSpec::default());
        }
        let selectors = split_top_level(input)?
            .into_iter()
            .map(|part| parse_selector(part, input))
            .collect::<Result<Vec<_>>>()?;
        Ok(FocusSpec { selectors })
    }

    /// Parses an optional focus string; absence means no focus.
    pub fn parse_optional(input: Option<&str>) -> Result<Self> {
        input.map_or_else(|| Ok(FocusSpec::default()), FocusSpec::parse)
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Focus of the line shown as `line_number`, if any selector picks it.
    /// A line selected whole by any selector is whole-focused; column
    /// selections of the same line are combined.
    pub fn line_focus(&self, line_number: usize) -> Option<LineFocus> {
        let mut result: Option<LineFocus> = None;
        for selector in self
            .selectors
            .iter()
            .filter(|s| s.lines.contains(line_number))
        {
            let Some(columns) = &selector.columns else {
                return Some(LineFocus::Whole);
            };
            if let Some(LineFocus::Columns(existing)) = &mut result {
                existing.extend(columns.iter().copied());
            } else {
                result = Some(LineFocus::Columns(columns.clone()));
            }
        }
        result
    }
}

impl FromStr for FocusSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FocusSpec::parse(s)
    }
}

/// Splits on commas that are not inside brackets.
fn split_top_level(input: &str) -> Result<Vec<&str>> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::malformed(input, "unbalanced `]`"))?;
            }
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::malformed(input, "unclosed `[`"));
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn parse_selector(part: &str, input: &str) -> Result<Selector> {
    let part = part.trim();
    match part.find('[') {
        None => {
            let (start, end) = parse_bounds(part, input)?;
            Ok(Selector {
                lines: LineRange { start, end },
                columns: None,
            })
        }
        Some(open) => {
            let inner = part[open + 1..]
                .strip_suffix(']')
                .ok_or_else(|| Error::malformed(input, format!("`{part}` must end with `]`")))?;
            let line_part = &part[..open];
            if line_part.contains(':') {
                return Err(Error::malformed(
                    input,
                    format!("`{part}`: column ranges apply to a single line"),
                ));
            }
            let line = parse_number(line_part, input)?;
            let columns = inner
                .split(',')
                .map(|c| parse_bounds(c, input).map(|(start, end)| ColumnRange { start, end }))
                .collect::<Result<Vec<_>>>()?;
            Ok(Selector {
                lines: LineRange {
                    start: line,
                    end: line,
                },
                columns: Some(columns),
            })
        }
    }
}

/// Parses `N` or `N:M` into inclusive 1-based bounds.
pub(crate) fn parse_bounds(part: &str, input: &str) -> Result<(usize, usize)> {
    let (start, end) = match part.split_once(':') {
        Some((start, end)) => (parse_number(start, input)?, parse_number(end, input)?),
        None => {
            let n = parse_number(part, input)?;
            (n, n)
        }
    };
    if end < start {
        return Err(Error::malformed(
            input,
            format!("range {start}:{end} ends before it starts"),
        ));
    }
    Ok((start, end))
}

fn parse_number(s: &str, input: &str) -> Result<usize> {
    let s = s.trim();
    match s.parse::<usize>() {
        Ok(0) => Err(Error::malformed(input, "numbers start at 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::malformed(input, format!("`{s}` is not a number"))),
    }
}
