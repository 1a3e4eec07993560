use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use crate::piece::{Piece, PieceKind};
use crate::square::Direction;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    /// No active piece; the next update spawns one.
    AwaitingSpawn,
    Falling,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned(PieceKind),
    PieceMoved,
    PieceRotated,
    PieceLocked,
    RowsCleared(usize),
    GameOver,
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> PieceKind;
}

/// Picks each kind uniformly at random.
pub struct RandomPieceProvider<R> {
    rng: R,
}

impl<R: Rng> RandomPieceProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPieceProvider<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PieceProvider for RandomPieceProvider<R> {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::random(&mut self.rng)
    }
}

/// Cycles through a fixed list of kinds.
pub struct SequencePieceProvider {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceProvider {
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<PieceKind>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    grid: Grid,
    piece: Option<Piece>,
    over: bool,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::from_entropy()))
    }

    /// Starts on an empty grid with a first piece drawn from `provider`.
    pub fn with_provider(provider: Box<dyn PieceProvider>) -> Self {
        let mut game = Self {
            grid: Grid::new(),
            piece: None,
            over: false,
            piece_provider: provider,
            events: Vec::new(),
        };
        game.spawn_next_piece();
        game
    }

    /// Starts from an arbitrary board and active piece.
    pub fn with_grid(grid: Grid, piece: Option<Piece>, provider: Box<dyn PieceProvider>) -> Self {
        let mut game = Self {
            grid,
            piece,
            over: false,
            piece_provider: provider,
            events: Vec::new(),
        };
        let overlapping = game
            .piece
            .as_ref()
            .filter(|piece| game.overlaps_grid(piece))
            .map(Piece::kind);
        if let Some(kind) = overlapping {
            game.end_game(kind);
        }
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn state(&self) -> GameState {
        if self.over {
            GameState::GameOver
        } else if self.piece.is_some() {
            GameState::Falling
        } else {
            GameState::AwaitingSpawn
        }
    }

    /// Replaces the active piece with a fresh `kind` at its spawn anchor.
    pub fn create_piece(&mut self, kind: PieceKind) -> &Piece {
        debug!("spawning {:?}", kind);
        self.events.push(GameEvent::PieceSpawned(kind));

        let piece = Piece::spawn(kind);
        if !self.over && self.overlaps_grid(&piece) {
            self.end_game(kind);
        }
        self.piece.insert(piece)
    }

    fn spawn_next_piece(&mut self) {
        let kind = self.piece_provider.next_piece();
        self.create_piece(kind);
    }

    /// Moves the active piece, then locks it if it can no longer fall.
    ///
    /// With no active piece this spawns one instead. Full rows are cleared
    /// after every call.
    pub fn move_piece(&mut self, direction: Direction) {
        if self.over {
            return;
        }
        if let Some(piece) = self.piece.as_mut() {
            let before = piece.locations();
            piece.shift(&self.grid, direction);
            if piece.locations() != before {
                self.events.push(GameEvent::PieceMoved);
            }
        }
        self.update_piece();
        self.clear_full_rows();
    }

    pub fn rotate_piece(&mut self) {
        if self.over {
            return;
        }
        if let Some(piece) = self.piece.as_mut() {
            let before = piece.locations();
            piece.rotate(&self.grid);
            if piece.locations() != before {
                self.events.push(GameEvent::PieceRotated);
            }
        }
        self.update_piece();
        self.clear_full_rows();
    }

    /// Routes a driver request: `Rotate` rotates, anything else moves.
    pub fn handle(&mut self, direction: Direction) {
        match direction {
            Direction::Rotate => self.rotate_piece(),
            _ => self.move_piece(direction),
        }
    }

    /// True once a piece has spawned on top of locked cells. Never reverts.
    ///
    /// Every way a piece enters the game checks for overlap and latches this.
    pub fn is_game_over(&self) -> bool {
        self.over
    }

    fn update_piece(&mut self) {
        let can_fall = self
            .piece
            .as_ref()
            .map(|piece| piece.can_move(&self.grid, Direction::Down));
        match can_fall {
            None => self.spawn_next_piece(),
            Some(false) => self.lock_piece(),
            Some(true) => {}
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        for square in piece.squares() {
            self.grid.freeze(square);
        }
        debug!("locked {:?} at {:?}", piece.kind(), piece.locations());
        self.events.push(GameEvent::PieceLocked);
    }

    fn clear_full_rows(&mut self) {
        let cleared = self.grid.clear_full_rows();
        if cleared > 0 {
            self.events.push(GameEvent::RowsCleared(cleared));
        }
    }

    fn overlaps_grid(&self, piece: &Piece) -> bool {
        piece
            .locations()
            .iter()
            .any(|&(row, col)| self.grid.is_occupied(row, col))
    }

    fn end_game(&mut self, kind: PieceKind) {
        self.over = true;
        info!("game over: {:?} spawned onto locked cells", kind);
        self.events.push(GameEvent::GameOver);
    }

    /// The grid with the active piece drawn over it.
    pub fn render_grid(&self) -> [[Cell; GRID_WIDTH]; GRID_HEIGHT] {
        let mut visual = [[Cell::Empty; GRID_WIDTH]; GRID_HEIGHT];
        for (row, cells) in self.grid.rows().enumerate() {
            visual[row] = *cells;
        }
        if let Some(piece) = &self.piece {
            for square in piece.squares() {
                visual[square.row()][square.col()] = Cell::Filled(square.color());
            }
        }
        visual
    }

    /// Takes and clears all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
