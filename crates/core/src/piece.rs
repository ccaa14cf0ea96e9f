//! Piece module - the falling piece and its movement rules
//!
//! Every movement is phrased the same way: build a candidate (offset and/or
//! rotation), ask the board whether the current kind fits there, and commit
//! only if it does. Failed moves are ordinary input and simply return false.

use crate::board::Board;
use crate::catalog::{self, ShapeGrid};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Horizontal offsets tried, in order, when a clockwise rotation is blocked.
///
/// The first entry is the unkicked attempt. Not the SRS kick tables.
pub const WALL_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation states, kept reduced modulo their count
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in spawn orientation, centered horizontally on row 0.
    ///
    /// `x = BOARD_WIDTH / 2 - width / 2`, where width is the column count of
    /// rotation state 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let width = catalog::definition(kind).spawn_width();
        Self {
            kind,
            rotation: 0,
            x: (BOARD_WIDTH / 2) as i8 - (width / 2) as i8,
            y: 0,
        }
    }

    /// Get the grid for the current rotation
    pub fn shape(&self) -> ShapeGrid {
        catalog::rotation_state(self.kind, self.rotation)
    }

    /// Check if the piece fits on the board where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid(self.shape(), self.x, self.y)
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        catalog::cells(self.shape()).map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Try to shift the piece; commits only if the target fits
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let (Some(x), Some(y)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return false;
        };
        if board.is_valid(self.shape(), x, y) {
            self.x = x;
            self.y = y;
            return true;
        }
        false
    }

    /// Rotate clockwise, trying the [`WALL_KICKS`] offsets in order.
    ///
    /// If no offset fits, rotation and position stay unchanged.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotation = (self.rotation + 1) % catalog::rotation_count(self.kind);
        let shape = catalog::rotation_state(self.kind, rotation);

        for dx in WALL_KICKS {
            let Some(x) = self.x.checked_add(dx) else {
                continue;
            };
            if board.is_valid(shape, x, self.y) {
                self.rotation = rotation;
                self.x = x;
                return true;
            }
        }

        false
    }

    /// Move down one row. Returns false once the piece has landed.
    pub fn soft_drop(&mut self, board: &Board) -> bool {
        self.try_move(board, 0, 1)
    }

    /// Landing position of the piece if dropped straight down from here.
    ///
    /// Steps a copy of the offset down from the current row until the shape
    /// no longer fits and reports `(x, last fitting y)`. Nothing is mutated.
    pub fn ghost_position(&self, board: &Board) -> (i8, i8) {
        let shape = self.shape();
        let mut y = self.y;
        while board.is_valid(shape, self.x, y) {
            y += 1;
        }
        (self.x, y - 1)
    }
}
