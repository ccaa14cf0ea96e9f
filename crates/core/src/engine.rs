//! Engine module - one player's complete game
//!
//! [`GameEngine`] owns the board, the falling piece, the one-piece lookahead,
//! the hold slot and the score/level bookkeeping, and is the only thing that
//! mutates them. The life of a piece is `Spawning -> Falling -> Landed` and
//! back to spawning, until a spawn does not fit and the game is over.
//!
//! Nothing here panics or errors for gameplay: moves report success as
//! `bool`, placements report a [`PlacementOutcome`]. Once the game is over
//! every piece-mutating call is a no-op that reports failure or game over.
//!
//! The engine keeps no clock. Callers run [`GameEngine::tick`] every
//! [`GameEngine::drop_interval_ms`] milliseconds to apply gravity.

use tracing::{debug, trace};

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::snapshot::{GameSnapshot, PieceView, Position};
use crate::types::{GameAction, PieceKind};

/// Result of writing a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementOutcome {
    /// Piece placed, this many rows cleared, next piece spawned
    Cleared(u32),
    /// The next piece could not spawn (or the game had already ended)
    GameOver,
}

impl PlacementOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, PlacementOutcome::GameOver)
    }

    /// Rows cleared, if the game goes on
    pub fn lines(&self) -> Option<u32> {
        match self {
            PlacementOutcome::Cleared(lines) => Some(*lines),
            PlacementOutcome::GameOver => None,
        }
    }

    /// Integer form: rows cleared, or `-1` for game over
    pub fn code(&self) -> i32 {
        match self {
            PlacementOutcome::Cleared(lines) => *lines as i32,
            PlacementOutcome::GameOver => -1,
        }
    }
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// The piece fell one row
    Moved,
    /// The piece had landed and was placed, clearing this many rows
    Placed(u32),
    GameOver,
}

/// Complete state of one player's game
#[derive(Debug, Clone)]
pub struct GameEngine<S: PieceSource = SimpleRng> {
    board: Board,
    current: ActivePiece,
    next: PieceKind,
    held: Option<PieceKind>,
    source: S,
    score: u32,
    lines: u32,
    level: u32,
    can_hold: bool,
    game_over: bool,
}

impl GameEngine<SimpleRng> {
    /// Create a new game whose pieces come from a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Create a new game drawing pieces from `source`.
    ///
    /// The first drawn kind becomes the current piece, the second the lookahead.
    pub fn with_source(mut source: S) -> Self {
        let first = source.next_kind();
        let next = source.next_kind();

        Self {
            board: Board::new(),
            current: ActivePiece::spawn(first),
            next,
            held: None,
            source,
            score: 0,
            lines: 0,
            level: 1,
            can_hold: true,
            game_over: false,
        }
    }

    /// Start over on an empty board with the same piece source
    pub fn reset(&mut self) {
        let first = self.source.next_kind();
        self.next = self.source.next_kind();
        self.current = ActivePiece::spawn(first);
        self.board.clear();
        self.held = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.can_hold = true;
        self.game_over = false;
        debug!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for preset positions (garbage rows, puzzles, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> ActivePiece {
        self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Promote the lookahead to the current piece and draw a new lookahead.
    ///
    /// Returns false, and ends the game, if the new piece does not fit at its
    /// spawn position. The board is left untouched either way.
    pub fn spawn(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.current = ActivePiece::spawn(self.next);
        self.next = self.source.next_kind();
        self.can_hold = true;

        if !self.current.is_valid(&self.board) {
            self.game_over = true;
            debug!(
                kind = self.current.kind.as_str(),
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            return false;
        }

        trace!(kind = self.current.kind.as_str(), "spawned");
        true
    }

    /// Try to move the current piece
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        self.current.try_move(&self.board, dx, dy)
    }

    pub fn move_left(&mut self) -> bool {
        self.move_piece(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_piece(1, 0)
    }

    /// Rotate the current piece clockwise with wall kicks
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.current.try_rotate(&self.board)
    }

    /// Move down one row. Returns false once the piece has landed; placing it
    /// is left to the caller ([`GameEngine::tick`] or [`GameEngine::hard_drop`]).
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.current.soft_drop(&self.board)
    }

    /// Drop the current piece as far as it goes and place it.
    ///
    /// Awards 2 points per row fallen before the placement is scored.
    pub fn hard_drop(&mut self) -> PlacementOutcome {
        if self.game_over {
            return PlacementOutcome::GameOver;
        }

        let mut rows = 0;
        while self.current.soft_drop(&self.board) {
            rows += 1;
        }
        self.score = self.score.saturating_add(calculate_drop_score(rows));

        self.lock_piece()
    }

    /// One gravity step: fall a row, or place the piece if it has landed
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::GameOver;
        }
        if self.current.soft_drop(&self.board) {
            return TickOutcome::Moved;
        }
        match self.lock_piece() {
            PlacementOutcome::Cleared(lines) => TickOutcome::Placed(lines),
            PlacementOutcome::GameOver => TickOutcome::GameOver,
        }
    }

    /// Write the current piece into the board, clear rows, score, and spawn
    fn lock_piece(&mut self) -> PlacementOutcome {
        let piece = self.current;
        self.board.place(piece.shape(), piece.x, piece.y, piece.kind);

        let cleared = self.board.clear_full_rows();
        self.score = self
            .score
            .saturating_add(calculate_line_score(cleared, self.level));
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = calculate_level(self.lines);

        trace!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "placed");
        if cleared > 0 {
            debug!(
                cleared,
                score = self.score,
                lines = self.lines,
                level = self.level,
                "rows cleared"
            );
        }

        if !self.spawn() {
            return PlacementOutcome::GameOver;
        }
        PlacementOutcome::Cleared(cleared as u32)
    }

    /// Put the current piece aside.
    ///
    /// The first hold stores the current kind and brings in the lookahead;
    /// later holds swap the current and held kinds without touching the
    /// lookahead. Either way the incoming piece starts at spawn orientation
    /// and position, and holding is locked until the next spawn.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || self.game_over {
            return false;
        }

        let outgoing = self.current.kind;
        let incoming = match self.held {
            Some(held) => held,
            None => {
                let promoted = self.next;
                self.next = self.source.next_kind();
                promoted
            }
        };

        self.held = Some(outgoing);
        self.current = ActivePiece::spawn(incoming);
        self.can_hold = false;
        true
    }

    /// Where the current piece would land if dropped now
    pub fn ghost_position(&self) -> (i8, i8) {
        self.current.ghost_position(&self.board)
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Apply a player action. Returns whether it took effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if self.game_over {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (ghost_x, ghost_y) = self.ghost_position();
        GameSnapshot {
            board: self.board.occupancy_grid(),
            score: self.score,
            lines_cleared: self.lines,
            level: self.level,
            current_piece: PieceView::new(self.current.kind, self.current.rotation),
            next_piece: PieceView::preview(self.next),
            held_piece: self.held.map(PieceView::preview),
            position: Position {
                x: self.current.x,
                y: self.current.y,
            },
            rotation: self.current.rotation,
            ghost: Position {
                x: ghost_x,
                y: ghost_y,
            },
            can_hold: self.can_hold,
            game_over: self.game_over,
        }
    }
}
