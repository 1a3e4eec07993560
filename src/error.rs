use thiserror::Error;

/// A coordinate that falls outside the board.
///
/// Raised when a square, piece or cell write is attempted off the grid. This
/// is always a caller defect, never a normal game condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("invalid row = {0}")]
    InvalidRow(isize),
    #[error("invalid column = {0}")]
    InvalidColumn(isize),
}
