//! Error types for the relay.

use crate::protocol::{PlayerId, RoomId};

/// Errors that can occur while routing relay traffic.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The room does not exist (and auto-create is off).
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The room already has its full complement of players.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The player is not a member of this room.
    #[error("player {0} not in room {1}")]
    PlayerNotFound(PlayerId, RoomId),

    /// An inbound message had no string `type` field.
    #[error("message has no \"type\" field")]
    MissingType,

    /// An inbound message was not valid JSON, or a known type had a bad payload.
    #[error("invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),
}
