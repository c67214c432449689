use crate::error::{Error, Result};
use crate::focus::parse_bounds;
use std::collections::HashMap;

/// Visible line numbers of one code state.
///
/// Lines are addressed by index (0-based position in the highlighted lines)
/// and shown with a visible number, declared as `"N:M"` ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumbers {
    numbers: Vec<usize>,
    indexes: HashMap<usize, usize>,
}

impl LineNumbers {
    /// Builds the lookup tables for `line_count` lines. Without a declared
    /// (or with a blank) range the lines are numbered from 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeshift::LineNumbers;
    ///
    /// let numbers = LineNumbers::parse(Some("5:7"), 3).unwrap();
    /// assert_eq!(numbers.number_at(0), Some(5));
    /// assert_eq!(numbers.index_of(7), Some(2));
    /// ```
    pub fn parse(declared: Option<&str>, line_count: usize) -> Result<Self> {
        let numbers = match declared.filter(|s| !s.trim().is_empty()) {
            Some(input) => parse_numbers(input, line_count)?,
            None => (1..=line_count).collect(),
        };
        let indexes = numbers
            .iter()
            .enumerate()
            .map(|(index, &number)| (number, index))
            .collect();
        Ok(LineNumbers { numbers, indexes })
    }

    pub fn number_at(&self, index: usize) -> Option<usize> {
        self.numbers.get(index).copied()
    }

    pub fn index_of(&self, number: usize) -> Option<usize> {
        self.indexes.get(&number).copied()
    }

    /// Visible number of the last line.
    pub fn last(&self) -> Option<usize> {
        self.numbers.last().copied()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

fn parse_numbers(input: &str, line_count: usize) -> Result<Vec<usize>> {
    let ranges = input
        .split(',')
        .map(|part| parse_bounds(part, input))
        .collect::<Result<Vec<_>>>()?;
    for pair in ranges.windows(2) {
        let ((_, previous_end), (start, _)) = (pair[0], pair[1]);
        if start <= previous_end {
            return Err(Error::malformed(
                input,
                format!("line {start} does not come after line {previous_end}"),
            ));
        }
    }
    // declared count, without expanding the ranges
    let declared = ranges
        .iter()
        .fold(0usize, |acc, (start, end)| acc.saturating_add(end - start + 1));
    if declared != line_count {
        return Err(Error::RangeLengthMismatch {
            input: input.to_string(),
            declared,
            actual: line_count,
        });
    }
    Ok(ranges
        .into_iter()
        .flat_map(|(start, end)| start..=end)
        .collect())
}
