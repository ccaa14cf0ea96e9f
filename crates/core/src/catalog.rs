//! Catalog module - static tetromino definitions
//!
//! Each kind owns an ordered list of rotation states. A rotation state is a
//! small row-major grid (row 0 on top) where `1` marks an occupied cell.
//! The number of states differs per kind (I/S/Z: 2, O: 1, T/J/L: 4), so
//! rotation indices are always reduced modulo the kind's own count.

use crate::rng::RandomSource;
use crate::types::PieceKind;

/// One rotation state: rows of 0/1 cells
pub type ShapeGrid = &'static [&'static [u8]];

/// Static definition of one tetromino kind
#[derive(Debug)]
pub struct TetrominoDefinition {
    pub kind: PieceKind,
    pub color: &'static str,
    pub rotations: &'static [ShapeGrid],
}

impl TetrominoDefinition {
    /// Number of distinct rotation states
    pub fn rotation_count(&self) -> u8 {
        self.rotations.len() as u8
    }

    /// Rotation state for `rotation mod rotation_count`
    pub fn rotation_state(&self, rotation: u8) -> ShapeGrid {
        self.rotations[(rotation % self.rotation_count()) as usize]
    }

    /// Column count of the spawn (index 0) state
    pub fn spawn_width(&self) -> u8 {
        self.rotations[0].first().map_or(0, |row| row.len() as u8)
    }
}

const I_ROTATIONS: &[ShapeGrid] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_ROTATIONS: &[ShapeGrid] = &[&[&[1, 1], &[1, 1]]];

const T_ROTATIONS: &[ShapeGrid] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const S_ROTATIONS: &[ShapeGrid] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_ROTATIONS: &[ShapeGrid] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

const J_ROTATIONS: &[ShapeGrid] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const L_ROTATIONS: &[ShapeGrid] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

/// The catalog, in [`PieceKind::ALL`] order
static CATALOG: [TetrominoDefinition; 7] = [
    TetrominoDefinition {
        kind: PieceKind::I,
        color: "#00ffff",
        rotations: I_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::O,
        color: "#ffff00",
        rotations: O_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::T,
        color: "#800080",
        rotations: T_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::S,
        color: "#00ff00",
        rotations: S_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::Z,
        color: "#ff0000",
        rotations: Z_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::J,
        color: "#0000ff",
        rotations: J_ROTATIONS,
    },
    TetrominoDefinition {
        kind: PieceKind::L,
        color: "#ffa500",
        rotations: L_ROTATIONS,
    },
];

/// Look up the definition for a kind
pub fn definition(kind: PieceKind) -> &'static TetrominoDefinition {
    &CATALOG[kind.index()]
}

pub fn rotation_count(kind: PieceKind) -> u8 {
    definition(kind).rotation_count()
}

/// Get the grid for a kind at `rotation mod rotation_count(kind)`
pub fn rotation_state(kind: PieceKind, rotation: u8) -> ShapeGrid {
    definition(kind).rotation_state(rotation)
}

pub fn color(kind: PieceKind) -> &'static str {
    definition(kind).color
}

/// Pick one of the seven kinds uniformly
pub fn random_kind<R: RandomSource + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}

/// Iterate the occupied `(col, row)` offsets of a grid
pub fn cells(grid: ShapeGrid) -> impl Iterator<Item = (i8, i8)> {
    grid.iter().enumerate().flat_map(|(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|(_, cell)| **cell != 0)
            .map(move |(col, _)| (col as i8, row as i8))
    })
}

/// Copy a grid into owned rows (for snapshots)
pub fn to_rows(grid: ShapeGrid) -> Vec<Vec<u8>> {
    grid.iter().map(|row| row.to_vec()).collect()
}
