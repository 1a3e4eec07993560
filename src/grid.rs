use log::debug;

use crate::cell::{BlockColor, Cell};
use crate::error::GeometryError;
use crate::square::Square;

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_HEIGHT: usize = 20;
pub const GRID_WIDTH: usize = 10;

// ============================================================================
// Grid
// ============================================================================

/// The board: `GRID_HEIGHT` rows of `GRID_WIDTH` cells.
///
/// Row 0 is the top, column 0 the left edge. Rows grow downward and columns
/// grow rightward.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Returns true if the cell at `(row, col)` is filled.
    ///
    /// # Panics
    ///
    /// Panics if `row >= GRID_HEIGHT` or `col >= GRID_WIDTH`.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_filled()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set_color(&mut self, row: usize, col: usize, color: BlockColor) -> Result<(), GeometryError> {
        self.set_cell(row, col, Cell::Filled(color))
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<(), GeometryError> {
        self.set_cell(row, col, Cell::Empty)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GeometryError> {
        check_bounds(row, col)?;
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Writes a square's color at its position. Squares are always on the
    /// board, so this cannot fail.
    pub fn freeze(&mut self, square: &Square) {
        self.cells[square.row()][square.col()] = Cell::Filled(square.color());
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(Cell::is_filled)
    }

    pub fn filled_in_row(&self, row: usize) -> usize {
        self.cells[row].iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// Read-only row access for drawing.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_WIDTH]> {
        self.cells.iter()
    }

    /// Removes every full row and collapses the rows above it.
    ///
    /// A single top-to-bottom sweep: a full row is emptied, every row above
    /// it shifts down by one, and the sweep carries on at the next index.
    /// Because rows only ever move downward into the row just cleared,
    /// adjacent full rows are still both removed in one call.
    ///
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;

        for row in 0..GRID_HEIGHT {
            if !self.is_row_full(row) {
                continue;
            }

            self.cells[row] = [Cell::Empty; GRID_WIDTH];
            for above in (0..row).rev() {
                self.cells[above + 1] = self.cells[above];
            }
            self.cells[0] = [Cell::Empty; GRID_WIDTH];

            cleared += 1;
            debug!("cleared row {}", row);
        }

        cleared
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn check_bounds(row: usize, col: usize) -> Result<(), GeometryError> {
    if row >= GRID_HEIGHT {
        return Err(GeometryError::InvalidRow(row as isize));
    }
    if col >= GRID_WIDTH {
        return Err(GeometryError::InvalidColumn(col as isize));
    }
    Ok(())
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..GRID_WIDTH {
            grid.cells[row][col] = Cell::Filled(BlockColor::Magenta);
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, row: usize, gap_col: usize) {
        for col in 0..GRID_WIDTH {
            if col != gap_col {
                grid.cells[row][col] = Cell::Filled(BlockColor::Magenta);
            }
        }
    }

    /// Fills `count` cells of `row`, centered horizontally.
    pub fn fill_centered(grid: &mut Grid, row: usize, count: usize) {
        let (mut left, mut right) = (0, GRID_WIDTH - 1);
        while left <= right {
            if right - left < count {
                grid.cells[row][left] = Cell::Filled(BlockColor::Magenta);
                grid.cells[row][right] = Cell::Filled(BlockColor::Magenta);
            }
            left += 1;
            if right == 0 {
                break;
            }
            right -= 1;
        }
    }

    /// Returns true if the filled cells of `row` are exactly the centered
    /// run of `count` cells.
    pub fn is_centered(grid: &Grid, row: usize, count: usize) -> bool {
        (0..GRID_WIDTH).all(|col| {
            let mirrored = col.min(GRID_WIDTH - 1 - col);
            let expected = GRID_WIDTH - 2 * mirrored <= count;
            grid.is_occupied(row, col) == expected
        })
    }
}
