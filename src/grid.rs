use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("symbol table is empty")]
    Empty,
    #[error("row {row} has {len} symbols, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) outside {rows}x{cols} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Immutable rectangular symbol table. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    cols: usize,
}

impl Grid {
    /// Validates that the table is non-empty and rectangular.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(GridError::Empty);
        }
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    len: symbols.len(),
                    expected: cols,
                });
            }
        }
        Ok(Self { rows, cols })
    }

    /// Parses a layout file: one row of symbols per line, blank lines skipped.
    pub fn from_lines(text: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        Self::new(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Bounds-checked lookup. The selection state machine clamps before it
    /// calls this, so `OutOfRange` marks a caller bug, not a user input.
    pub fn symbol_at(&self, row: usize, col: usize) -> Result<char, GridError> {
        self.rows
            .get(row)
            .and_then(|symbols| symbols.get(col))
            .copied()
            .ok_or(GridError::OutOfRange {
                row,
                col,
                rows: self.rows.len(),
                cols: self.cols,
            })
    }

    pub fn row_symbols(&self, row: usize) -> &[char] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for Grid {
    /// The fixed Cyrillic letter board.
    fn default() -> Self {
        let rows = ["АБВГД", "ЕЁЖЗИ", "ЙКЛМН", "ОПРСТ", "УФХЦЧ", "ШЩЪЫЬ", "ЭЮЯ.,"]
            .iter()
            .map(|line| line.chars().collect())
            .collect();
        Self::new(rows).expect("default board is rectangular")
    }
}
