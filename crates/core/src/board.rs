//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or remembers the kind of
//! piece that filled it. Uses a flat array for cache locality; the dimensions
//! never change, only cell contents do.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! Pieces may stick out above row 0 (negative y). Those cells are bounded
//! horizontally but never collide, and are dropped when the piece is placed.

use arrayvec::ArrayVec;

use crate::catalog::{cells, ShapeGrid};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices of full rows, top to bottom
pub type FullRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a shape fits with its top-left corner at (x, y).
    ///
    /// A cell is rejected when it leaves the board horizontally, falls below
    /// the last row, or lands on an occupied cell. Cells above row 0 are
    /// only checked horizontally.
    pub fn is_valid(&self, grid: ShapeGrid, x: i8, y: i8) -> bool {
        cells(grid).all(|(dx, dy)| {
            let (Some(px), Some(py)) = (x.checked_add(dx), y.checked_add(dy)) else {
                return false;
            };
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Write a shape onto the board, tagging cells with `kind`.
    ///
    /// Cells above row 0 are silently dropped. No validity check is made.
    pub fn place(&mut self, grid: ShapeGrid, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in cells(grid) {
            let (Some(px), Some(py)) = (x.checked_add(dx), y.checked_add(dy)) else {
                continue;
            };
            if py >= 0 {
                self.set(px, py, Some(kind));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// All full rows, top to bottom
    pub fn full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row at once and compact the survivors downward.
    ///
    /// Full rows are found before anything moves, so simultaneous clears
    /// keep the relative order of the remaining rows. Empty rows refill the
    /// top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }

        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top, copying survivors to the write cursor
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if full.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        full.len()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major 0/1 occupancy, one `Vec` per row
    pub fn occupancy_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.iter().map(|cell| cell.is_some() as u8).collect())
            .collect()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
