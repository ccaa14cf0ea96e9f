//! Relay - mirrors two players' boards to each other
//!
//! The relay is a fan-out of JSON envelopes between the players of a room.
//! It never runs a game itself and never validates what players report: a
//! `game_state` from one player reaches the others unchanged.
//!
//! # Message Types
//!
//! ## Client → Relay
//!
//! - **game_state**: the sender's snapshot, forwarded to the others as `opponent_state`
//! - **game_over**: the sender topped out, broadcast to everyone as `player_game_over`
//!
//! ## Relay → Client
//!
//! - **player_id**: the id assigned on join (joining player only)
//! - **player_joined** / **player_left**: membership changes with the new player count
//! - **opponent_state**: another player's forwarded state
//! - **player_game_over**: someone's game ended, with their score
//!
//! # Example Flow
//!
//! ```text
//! Relay -> A:    {"type":"player_id","player_id":"3f9a1c"}
//! Relay -> A:    {"type":"player_joined","player_id":"3f9a1c","player_count":1}
//! Relay -> A, B: {"type":"player_joined","player_id":"b07e22","player_count":2}
//! A -> Relay:    {"type":"game_state","state":{...}}
//! Relay -> B:    {"type":"opponent_state","player_id":"3f9a1c","state":{...}}
//! ```
//!
//! # Transport
//!
//! Connections are represented only by their outbound channel
//! ([`PlayerSender`]). Whatever owns the sockets forwards inbound frames to
//! [`RoomRegistry::handle_text`] and calls [`RoomRegistry::leave`] when a
//! connection goes away.

pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;

pub use tetris_duel_core as core;
pub use tetris_duel_types as types;

pub use config::RelayConfig;
pub use error::RelayError;
pub use protocol::{
    parse_client_message, parse_server_message, ClientMessage, PlayerId, RoomId, ServerMessage,
};
pub use registry::{PlayerSender, RoomRegistry};
