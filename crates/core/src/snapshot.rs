//! Snapshot module - serializable view of a game
//!
//! A snapshot is the only contract between the engine and whatever shows or
//! transmits it. Building one never mutates the engine.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::types::PieceKind;

/// A piece as shown to other players: kind, one rotation grid and color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub shape: Vec<Vec<u8>>,
    pub color: String,
}

impl PieceView {
    /// View of `kind` at `rotation` (reduced modulo the kind's count)
    pub fn new(kind: PieceKind, rotation: u8) -> Self {
        Self {
            kind,
            shape: catalog::to_rows(catalog::rotation_state(kind, rotation)),
            color: catalog::color(kind).to_string(),
        }
    }

    /// Spawn-orientation view, used for the next and held slots
    pub fn preview(kind: PieceKind) -> Self {
        Self::new(kind, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 20 rows of 10 cells, 1 = occupied
    pub board: Vec<Vec<u8>>,
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub current_piece: PieceView,
    pub next_piece: PieceView,
    pub held_piece: Option<PieceView>,
    pub position: Position,
    pub rotation: u8,
    pub ghost: Position,
    pub can_hold: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_view_uses_requested_rotation() {
        let view = PieceView::new(PieceKind::J, 1);
        assert_eq!(view.shape, vec![vec![1, 1], vec![1, 0], vec![1, 0]]);
        assert_eq!(view.color, "#0000ff");
    }

    #[test]
    fn preview_is_spawn_orientation() {
        let view = PieceView::preview(PieceKind::I);
        assert_eq!(view.shape, vec![vec![1, 1, 1, 1]]);
    }

    #[test]
    fn piece_view_json_field_names() {
        let json = serde_json::to_value(PieceView::preview(PieceKind::O)).unwrap();
        assert_eq!(json["type"], "O");
        assert_eq!(json["color"], "#ffff00");
        assert_eq!(json["shape"][1][1], 1);
    }
}
