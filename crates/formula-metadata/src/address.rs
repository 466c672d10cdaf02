use core::fmt;

use thiserror::Error;

/// Maximum number of rows in an Excel worksheet (1,048,576).
pub const EXCEL_MAX_ROWS: u32 = 1_048_576;
/// Maximum number of columns in an Excel worksheet (16,384, column `XFD`).
pub const EXCEL_MAX_COLS: u32 = 16_384;

/// A cell reference as written in A1 notation, including its `$` absolute markers.
///
/// Rows and columns are **0-indexed**: `row = 0` is Excel row `1`, `col = 0` is column `A`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellReference {
    pub row: u32,
    pub col: u32,
    pub row_absolute: bool,
    pub col_absolute: bool,
}

impl CellReference {
    /// A relative reference (`A1` style, no `$` markers).
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
        }
    }

    #[must_use]
    pub const fn absolute(self) -> Self {
        Self {
            row_absolute: true,
            col_absolute: true,
            ..self
        }
    }

    /// Drop any `$` markers, keeping the same cell.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        Self::new(self.row, self.col)
    }

    pub const fn is_relative(&self) -> bool {
        !self.row_absolute && !self.col_absolute
    }

    /// Convert to Excel A1 notation (e.g. `A1`, `$BC$32`).
    pub fn to_a1(self) -> String {
        format!(
            "{}{}{}{}",
            if self.col_absolute { "$" } else { "" },
            col_to_name(self.col),
            if self.row_absolute { "$" } else { "" },
            self.row + 1
        )
    }

    /// Parse an Excel A1-style reference (e.g. `A1`, `$B$2`, `B$2`).
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(A1ParseError::Empty);
        }

        let bytes = s.as_bytes();
        let mut idx = 0usize;
        let col_absolute = bytes.get(idx) == Some(&b'$');
        if col_absolute {
            idx += 1;
        }

        let col_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
            idx += 1;
        }
        if idx == col_start {
            return Err(A1ParseError::MissingColumn);
        }
        let col_str = &s[col_start..idx];

        let row_absolute = bytes.get(idx) == Some(&b'$');
        if row_absolute {
            idx += 1;
        }

        let row_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == row_start {
            return Err(A1ParseError::MissingRow);
        }
        if idx != bytes.len() {
            return Err(A1ParseError::TrailingCharacters);
        }

        let col = name_to_col(col_str)?;
        if col >= EXCEL_MAX_COLS {
            return Err(A1ParseError::InvalidColumn);
        }
        let row_1_based: u32 = s[row_start..idx]
            .parse()
            .map_err(|_| A1ParseError::InvalidRow)?;
        if row_1_based == 0 || row_1_based > EXCEL_MAX_ROWS {
            return Err(A1ParseError::InvalidRow);
        }

        Ok(Self {
            row: row_1_based - 1,
            col,
            row_absolute,
            col_absolute,
        })
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// An inclusive rectangular region, normalized so `start` is the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRange {
    pub start: CellReference,
    pub end: CellReference,
}

impl CellRange {
    pub fn new(a: CellReference, b: CellReference) -> Self {
        let (start_row, end_row) = if a.row <= b.row { (a, b) } else { (b, a) };
        let (start_col, end_col) = if a.col <= b.col { (a, b) } else { (b, a) };
        Self {
            start: CellReference {
                row: start_row.row,
                col: start_col.col,
                row_absolute: start_row.row_absolute,
                col_absolute: start_col.col_absolute,
            },
            end: CellReference {
                row: end_row.row,
                col: end_col.col,
                row_absolute: end_row.row_absolute,
                col_absolute: end_col.col_absolute,
            },
        }
    }

    #[must_use]
    pub fn to_relative(self) -> Self {
        Self {
            start: self.start.to_relative(),
            end: self.end.to_relative(),
        }
    }

    pub const fn is_single_cell(&self) -> bool {
        self.start.row == self.end.row && self.start.col == self.end.col
    }

    pub const fn contains(&self, cell: CellReference) -> bool {
        cell.row >= self.start.row
            && cell.row <= self.end.row
            && cell.col >= self.start.col
            && cell.col <= self.end.col
    }

    /// Parse `A1:B2` or a single cell like `C3`.
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        match s.split_once(':') {
            None => {
                let cell = CellReference::from_a1(s)?;
                Ok(CellRange::new(cell, cell))
            }
            Some((a, b)) => {
                let start = CellReference::from_a1(a)?;
                let end = CellReference::from_a1(b)?;
                Ok(CellRange::new(start, end))
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() && self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Errors that can occur when parsing an A1 cell reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum A1ParseError {
    #[error("empty A1 reference")]
    Empty,
    #[error("missing column in A1 reference")]
    MissingColumn,
    #[error("missing row in A1 reference")]
    MissingRow,
    #[error("invalid column in A1 reference")]
    InvalidColumn,
    #[error("invalid row in A1 reference")]
    InvalidRow,
    #[error("trailing characters in A1 reference")]
    TrailingCharacters,
}

/// Errors that can occur when parsing an A1 range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("empty A1 range")]
    Empty,
    #[error("invalid cell reference in range: {0}")]
    Cell(#[from] A1ParseError),
}

fn col_to_name(col: u32) -> String {
    // A1 columns are 1-based; stored 0-based.
    let mut n = col + 1;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).expect("column letters are always valid UTF-8")
}

fn name_to_col(s: &str) -> Result<u32, A1ParseError> {
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(A1ParseError::InvalidColumn);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(A1ParseError::InvalidColumn)?;
    }
    if col == 0 {
        return Err(A1ParseError::InvalidColumn);
    }
    Ok(col - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_markers() {
        let c = CellReference::from_a1("$B$2").unwrap();
        assert_eq!(c, CellReference::new(1, 1).absolute());
        assert_eq!(c.to_a1(), "$B$2");
        assert_eq!(c.to_relative().to_a1(), "B2");

        let mixed = CellReference::from_a1("B$2").unwrap();
        assert!(!mixed.col_absolute);
        assert!(mixed.row_absolute);
        assert_eq!(mixed.to_a1(), "B$2");
    }

    #[test]
    fn range_is_normalized_top_left_first() {
        let r = CellRange::from_a1("C3:A1").unwrap();
        assert_eq!(r.start, CellReference::new(0, 0));
        assert_eq!(r.end, CellReference::new(2, 2));
        assert_eq!(r.to_string(), "A1:C3");
        assert!(r.contains(CellReference::new(1, 1)));
    }

    #[test]
    fn bounds_are_excel_compatible() {
        assert!(CellReference::from_a1("XFD1048576").is_ok());
        assert_eq!(
            CellReference::from_a1("XFE1"),
            Err(A1ParseError::InvalidColumn)
        );
        assert_eq!(
            CellReference::from_a1("A1048577"),
            Err(A1ParseError::InvalidRow)
        );
        assert_eq!(
            CellReference::from_a1("A1x"),
            Err(A1ParseError::TrailingCharacters)
        );
    }
}
