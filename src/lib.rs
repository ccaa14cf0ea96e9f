//! Tetris Duel (workspace facade crate).
//!
//! Re-exports the member crates under one roof:
//! `tetris_duel::{core, relay, types}`. The implementation lives in the
//! dedicated crates under `crates/`.

pub use tetris_duel_core as core;
pub use tetris_duel_relay as relay;
pub use tetris_duel_types as types;
