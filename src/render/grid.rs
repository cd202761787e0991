//! Cell addressing for the output grid.
//!
//! Coordinates are zero-indexed internally and rendered in A1 notation
//! (`A1`, `B4:H4`) when handed to a store.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        CellRange { start, end }
    }

    pub fn cell(row: usize, col: usize) -> Self {
        let at = CellRef::new(row, col);
        CellRange::new(at, at)
    }

    /// Columns `first..=last` of a single row.
    pub fn row_span(row: usize, first: usize, last: usize) -> Self {
        CellRange::new(CellRef::new(row, first), CellRef::new(row, last))
    }

    /// A block starting at `top_left` sized to fit `rows`.
    pub fn block<T>(top_left: CellRef, rows: &[Vec<T>]) -> Self {
        let height = rows.len().max(1);
        let width = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
        CellRange::new(
            top_left,
            CellRef::new(top_left.row + height - 1, top_left.col + width - 1),
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// A value written into one cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Int(n as i64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

/// Pixel size for the half-open index span `start..end` along one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionSize {
    pub dimension: Dimension,
    pub start: usize,
    pub end: usize,
    pub pixels: u32,
}
