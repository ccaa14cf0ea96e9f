//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the Tetris rules: the piece catalog, the board, the
//! falling piece and the engine that ties them together. It does no I/O and
//! keeps no clock, so it runs the same in a server, a test or a benchmark.
//!
//! - **Deterministic**: the piece source is injected per engine; same seed, same game
//! - **Independent**: every [`GameEngine`] owns its state, nothing is shared
//! - **Non-panicking**: gameplay outcomes are booleans and enums, never errors
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven tetrominoes, their rotation grids and colors
//! - [`board`]: 10x20 grid with collision testing and line clearing
//! - [`piece`]: the falling piece, movement and wall-kicked rotation
//! - [`rng`]: seedable and scripted piece sources
//! - [`scoring`]: line-clear points, levels and gravity speed
//! - [`snapshot`]: serializable view of a game
//! - [`engine`]: spawning, placement, hold and scoring orchestration
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{GameEngine, PlacementOutcome};
//!
//! let mut game = GameEngine::new(12345);
//! game.move_left();
//! game.rotate();
//!
//! let outcome = game.hard_drop();
//! assert!(matches!(outcome, PlacementOutcome::Cleared(0)));
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod catalog;
pub mod engine;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_duel_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{ShapeGrid, TetrominoDefinition};
pub use engine::{GameEngine, PlacementOutcome, TickOutcome};
pub use piece::ActivePiece;
pub use rng::{FixedSequence, PieceSource, RandomSource, SimpleRng};
pub use snapshot::{GameSnapshot, PieceView, Position};
