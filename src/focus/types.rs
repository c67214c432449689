use serde::Serialize;

/// 1-based, inclusive range of visible line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn contains(&self, line_number: usize) -> bool {
        self.start <= line_number && line_number <= self.end
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// 1-based, inclusive range of columns, counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    /// Whether the 0-based half-open char span `[from, to)` lies inside.
    pub fn covers(&self, from: usize, to: usize) -> bool {
        self.start - 1 <= from && to <= self.end
    }
}

/// One comma-separated part of a focus string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub lines: LineRange,
    /// `None` selects the whole lines.
    pub columns: Option<Vec<ColumnRange>>,
}

/// What is focused on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineFocus {
    Whole,
    Columns(Vec<ColumnRange>),
}

impl LineFocus {
    /// Whether the 0-based half-open char span `[from, to)` is focused.
    pub fn covers(&self, from: usize, to: usize) -> bool {
        match self {
            LineFocus::Whole => true,
            LineFocus::Columns(columns) => columns.iter().any(|c| c.covers(from, to)),
        }
    }

    pub fn columns(&self) -> &[ColumnRange] {
        match self {
            LineFocus::Whole => &[],
            LineFocus::Columns(columns) => columns,
        }
    }
}
