//! Pixel patterns painted onto the contribution calendar
//!
//! A pattern is a rectangular 0/1 grid. Presets ship with the binary; custom
//! patterns load from plain text files.

mod presets;
mod schedule;

pub(crate) use presets::{preset, preset_names};
pub(crate) use schedule::commit_dates;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pattern {
    name: String,
    cells: Vec<Vec<u8>>,
}

impl Pattern {
    /// Build a pattern from row-major 0/1 cells. Empty grids, ragged rows,
    /// and non-binary cells are rejected.
    pub(crate) fn new(name: impl Into<String>, cells: Vec<Vec<u8>>) -> Result<Self, AppError> {
        if cells.is_empty() {
            return Err(AppError::InvalidPattern {
                reason: "pattern has no rows".to_string(),
            });
        }
        let width = cells[0].len();
        if width == 0 {
            return Err(AppError::InvalidPattern {
                reason: "pattern has no columns".to_string(),
            });
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(AppError::InvalidPattern {
                    reason: format!(
                        "row {} has {} cells, expected {}",
                        i + 1,
                        row.len(),
                        width
                    ),
                });
            }
            if let Some(cell) = row.iter().find(|c| **c > 1) {
                return Err(AppError::InvalidPattern {
                    reason: format!("cell value {cell} in row {} (cells are 0 or 1)", i + 1),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            cells,
        })
    }

    /// Parse a text grid: `#`, `1`, `x` are on; `.`, `0` are off. Blank
    /// lines are skipped.
    pub(crate) fn from_text(name: impl Into<String>, text: &str) -> Result<Self, AppError> {
        let mut cells = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(trimmed.len());
            for ch in trimmed.chars() {
                match ch {
                    '#' | '1' | 'x' | 'X' => row.push(1),
                    '.' | '0' => row.push(0),
                    other => {
                        return Err(AppError::InvalidPattern {
                            reason: format!("unexpected character '{other}' on line {}", line_no + 1),
                        });
                    }
                }
            }
            cells.push(row);
        }
        Self::new(name, cells)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rows(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub(crate) fn is_on(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == 1
    }

    /// Number of "on" cells, i.e. commits before window clamping and dedup
    pub(crate) fn on_cells(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|c| **c == 1).count())
            .sum()
    }

    pub(crate) fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grid() {
        assert!(Pattern::new("empty", vec![]).is_err());
        assert!(Pattern::new("empty", vec![vec![]]).is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Pattern::new("ragged", vec![vec![1, 0], vec![1]]).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn rejects_non_binary_cells() {
        assert!(Pattern::new("bad", vec![vec![0, 2]]).is_err());
    }

    #[test]
    fn counts_on_cells() {
        let p = Pattern::new("p", vec![vec![1, 0, 1], vec![0, 0, 1]]).unwrap();
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 3);
        assert_eq!(p.on_cells(), 3);
        assert!(p.is_on(0, 0));
        assert!(!p.is_on(1, 0));
    }

    #[test]
    fn parses_text_grid() {
        let p = Pattern::from_text("custom", "#.#\n.#.\n\n#.#\n").unwrap();
        assert_eq!(p.rows(), 3);
        assert_eq!(p.cols(), 3);
        assert_eq!(p.on_cells(), 5);
    }

    #[test]
    fn parses_zero_one_grid() {
        let p = Pattern::from_text("bits", "101\n010\n").unwrap();
        assert_eq!(p.on_cells(), 3);
    }

    #[test]
    fn text_grid_rejects_unknown_chars() {
        let err = Pattern::from_text("bad", "#?#\n").unwrap_err();
        assert!(err.to_string().contains("'?'"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn all_off_pattern_is_valid() {
        let p = Pattern::from_text("blank", "...\n...\n").unwrap();
        assert_eq!(p.on_cells(), 0);
    }
}
