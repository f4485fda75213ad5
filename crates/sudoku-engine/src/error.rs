use thiserror::Error;

/// Rejected puzzle input.
///
/// Only the board shape is validated at construction; cell values are
/// taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("invalid sudoku puzzle: expected 9 rows, found {0}")]
    RowCount(usize),

    #[error("invalid sudoku puzzle: row {index} has {found} cells, expected 9")]
    RowLength { index: usize, found: usize },
}
