use rand::Rng;

use crate::cell::BlockColor;
use crate::error::GeometryError;
use crate::grid::{Grid, GRID_WIDTH};
use crate::square::{Direction, Square};

pub const PIECE_COUNT: usize = 4;

/// Index of the square every piece rotates about.
pub const PIVOT: usize = 1;

// ============================================================================
// Shape Table
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    I,
    O,
    Z,
    S,
    T,
    J,
    L,
}

struct Shape {
    offsets: [(isize, isize); PIECE_COUNT],
    color: BlockColor,
    anchor: (usize, usize),
    rotates: bool,
}

const CENTER: usize = GRID_WIDTH / 2;

const fn shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape {
            offsets: [(0, -1), (0, 0), (0, 1), (0, 2)],
            color: BlockColor::Cyan,
            anchor: (0, CENTER - 1),
            rotates: true,
        },
        PieceKind::O => Shape {
            offsets: [(0, -1), (0, 0), (1, -1), (1, 0)],
            color: BlockColor::Gray,
            anchor: (0, CENTER),
            rotates: false,
        },
        PieceKind::Z => Shape {
            offsets: [(0, -1), (0, 0), (1, 0), (1, 1)],
            color: BlockColor::Red,
            anchor: (0, CENTER - 1),
            rotates: true,
        },
        PieceKind::S => Shape {
            offsets: [(0, 1), (0, 0), (1, 0), (1, -1)],
            color: BlockColor::Green,
            anchor: (0, CENTER),
            rotates: true,
        },
        PieceKind::T => Shape {
            offsets: [(0, -1), (0, 0), (0, 1), (1, 0)],
            color: BlockColor::Magenta,
            anchor: (0, CENTER - 1),
            rotates: true,
        },
        PieceKind::J => Shape {
            offsets: [(-1, 0), (0, 0), (1, 0), (1, -1)],
            color: BlockColor::Blue,
            anchor: (1, CENTER),
            rotates: true,
        },
        PieceKind::L => Shape {
            offsets: [(-1, 0), (0, 0), (1, 0), (1, 1)],
            color: BlockColor::Orange,
            anchor: (1, CENTER - 1),
            rotates: true,
        },
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
    ];

    /// `(row, col)` offsets of the four squares relative to the anchor.
    pub fn offsets(self) -> [(isize, isize); PIECE_COUNT] {
        shape(self).offsets
    }

    pub fn color(self) -> BlockColor {
        shape(self).color
    }

    pub fn spawn_anchor(self) -> (usize, usize) {
        shape(self).anchor
    }

    /// False for shapes whose rotation is a permanent no-op.
    pub fn rotates(self) -> bool {
        shape(self).rotates
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

// ============================================================================
// Piece
// ============================================================================

/// Four squares of one kind, floating above the grid until locked.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    kind: PieceKind,
    squares: [Square; PIECE_COUNT],
    able_to_move: bool,
}

impl Piece {
    /// Builds a piece with its anchor (the pivot) at `(row, col)`.
    pub fn new(kind: PieceKind, row: isize, col: isize) -> Result<Self, GeometryError> {
        let color = kind.color();
        let [a, b, c, d] = kind
            .offsets()
            .map(|(dr, dc)| Square::new(row + dr, col + dc, color, true));

        Ok(Self {
            kind,
            squares: [a?, b?, c?, d?],
            able_to_move: true,
        })
    }

    /// Builds a piece at its kind's spawn anchor near the top center.
    pub fn spawn(kind: PieceKind) -> Self {
        let (row, col) = kind.spawn_anchor();
        let color = kind.color();
        let squares = kind.offsets().map(|(dr, dc)| {
            Square::spawned(row.wrapping_add_signed(dr), col.wrapping_add_signed(dc), color)
        });

        Self {
            kind,
            squares,
            able_to_move: true,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.squares[0].color()
    }

    pub fn squares(&self) -> &[Square; PIECE_COUNT] {
        &self.squares
    }

    /// `(row, col)` of every square, in square order.
    pub fn locations(&self) -> [(usize, usize); PIECE_COUNT] {
        self.squares.map(|square| (square.row(), square.col()))
    }

    /// False once a `Down` move has been refused.
    pub fn is_able_to_move(&self) -> bool {
        self.able_to_move
    }

    pub fn can_move(&self, grid: &Grid, direction: Direction) -> bool {
        self.able_to_move && self.squares.iter().all(|square| square.can_move(grid, direction))
    }

    /// Moves every square one step, or none of them.
    ///
    /// `Drop` falls until blocked. A refused `Down` freezes the piece.
    /// Pieces never climb: `Up` is left to square-level rotation.
    pub fn shift(&mut self, grid: &Grid, direction: Direction) {
        match direction {
            Direction::Up | Direction::Rotate => return,
            Direction::Drop => {
                while self.can_move(grid, Direction::Down) {
                    self.shift(grid, Direction::Down);
                }
                return;
            }
            _ => {}
        }

        if self.can_move(grid, direction) {
            for square in &mut self.squares {
                square.shift(grid, direction);
            }
        } else if direction == Direction::Down {
            self.able_to_move = false;
        }
    }

    pub fn can_rotate(&self, grid: &Grid) -> bool {
        if !self.kind.rotates() {
            return true;
        }
        let pivot = self.squares[PIVOT];
        self.squares.iter().all(|square| square.can_rotate(grid, &pivot))
    }

    pub fn rotate(&mut self, grid: &Grid) {
        if !self.kind.rotates() || !self.can_rotate(grid) {
            return;
        }
        let pivot = self.squares[PIVOT];
        for square in &mut self.squares {
            square.rotate(grid, &pivot);
        }
    }
}
