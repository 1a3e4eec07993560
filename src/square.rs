use crate::cell::BlockColor;
use crate::error::GeometryError;
use crate::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};

/// Requests the engine understands.
///
/// `Drop` and `Rotate` are pseudo-directions: `Drop` repeats `Down` until
/// blocked, `Rotate` is routed to rotation by [`crate::game::Game::handle`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Drop,
    Rotate,
}

impl Direction {
    /// One-step `(row, col)` delta, or `None` for the pseudo-directions.
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Direction::Up => Some((-1, 0)),
            Direction::Down => Some((1, 0)),
            Direction::Left => Some((0, -1)),
            Direction::Right => Some((0, 1)),
            Direction::Drop | Direction::Rotate => None,
        }
    }
}

/// One unit of a piece, always inside the grid.
///
/// A square never owns the grid it checks against; every query borrows it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Square {
    row: usize,
    col: usize,
    color: BlockColor,
    movable: bool,
}

impl Square {
    pub fn new(row: isize, col: isize, color: BlockColor, movable: bool) -> Result<Self, GeometryError> {
        if row < 0 || row >= GRID_HEIGHT as isize {
            return Err(GeometryError::InvalidRow(row));
        }
        if col < 0 || col >= GRID_WIDTH as isize {
            return Err(GeometryError::InvalidColumn(col));
        }

        Ok(Self {
            row: row as usize,
            col: col as usize,
            color,
            movable,
        })
    }

    /// Spawn anchors are fixed, so their cells need no runtime check.
    pub(crate) fn spawned(row: usize, col: usize, color: BlockColor) -> Self {
        debug_assert!(row < GRID_HEIGHT && col < GRID_WIDTH);
        Self {
            row,
            col,
            color,
            movable: true,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn set_color(&mut self, color: BlockColor) {
        self.color = color;
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    fn step_target(&self, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.delta()?;
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < GRID_HEIGHT && col < GRID_WIDTH).then_some((row, col))
    }

    /// Returns true if this square can move one step in `direction`.
    pub fn can_move(&self, grid: &Grid, direction: Direction) -> bool {
        if !self.movable {
            return false;
        }
        match self.step_target(direction) {
            Some((row, col)) => !grid.is_occupied(row, col),
            None => false,
        }
    }

    pub fn shift(&mut self, grid: &Grid, direction: Direction) {
        if !self.can_move(grid, direction) {
            return;
        }
        if let Some((row, col)) = self.step_target(direction) {
            self.row = row;
            self.col = col;
        }
    }

    /// Where this square lands after a quarter turn about `pivot`, if that
    /// spot is on the board.
    pub fn rotation_target(&self, pivot: &Square) -> Option<(usize, usize)> {
        let (row, col) = (self.row as isize, self.col as isize);
        let (pivot_row, pivot_col) = (pivot.row as isize, pivot.col as isize);

        let dest_row = pivot_row + (col - pivot_col);
        let dest_col = pivot_col + (pivot_row - row);

        let on_board = (0..GRID_HEIGHT as isize).contains(&dest_row)
            && (0..GRID_WIDTH as isize).contains(&dest_col);
        on_board.then_some((dest_row as usize, dest_col as usize))
    }

    /// Returns true if the destination of a quarter turn about `pivot` is on
    /// the board and the L-shaped path to it is clear.
    ///
    /// The path is checked one axis at a time, in the order given by the
    /// quadrant of the move. Every quadrant that matches is checked, so a
    /// move along a single axis is checked along both candidate paths.
    pub fn can_rotate(&self, grid: &Grid, pivot: &Square) -> bool {
        let Some((dest_row, dest_col)) = self.rotation_target(pivot) else {
            return false;
        };

        let (row, col) = (self.row as isize, self.col as isize);
        let (dest_row, dest_col) = (dest_row as isize, dest_col as isize);
        let rows = (dest_row - row).abs();
        let cols = (dest_col - col).abs();

        let clear = |start: (isize, isize), step: (isize, isize), len: isize| {
            (0..=len).all(|i| {
                let r = start.0 + step.0 * i;
                let c = start.1 + step.1 * i;
                !grid.is_occupied(r as usize, c as usize)
            })
        };

        // right then down
        if dest_row >= row && dest_col >= col
            && !(clear((row, col), (0, 1), cols) && clear((row, dest_col), (1, 0), rows))
        {
            return false;
        }

        // down then left
        if dest_col <= col && dest_row >= row
            && !(clear((row, col), (1, 0), rows) && clear((dest_row, col), (0, -1), cols))
        {
            return false;
        }

        // left then up
        if dest_row <= row && dest_col <= col
            && !(clear((row, col), (0, -1), cols) && clear((row, dest_col), (-1, 0), rows))
        {
            return false;
        }

        // up then right
        if dest_col >= col && dest_row <= row
            && !(clear((row, col), (-1, 0), rows) && clear((dest_row, col), (0, 1), cols))
        {
            return false;
        }

        true
    }

    pub fn rotate(&mut self, grid: &Grid, pivot: &Square) {
        if !self.can_rotate(grid, pivot) {
            return;
        }
        if let Some((row, col)) = self.rotation_target(pivot) {
            self.row = row;
            self.col = col;
        }
    }
}
