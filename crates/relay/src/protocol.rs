//! Protocol module - JSON envelopes exchanged through the relay
//!
//! Every message is a JSON object with a string `type` field; the remaining
//! fields are the payload. The relay only looks inside the envelope far
//! enough to route it: a player's `state` is forwarded verbatim and never
//! validated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::GameSnapshot;
use crate::error::RelayError;

/// Short random id of a room (8 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn generate() -> Self {
        Self(short_id(8))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short random id of a player (6 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn generate() -> Self {
        Self(short_id(6))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefix of a v4 uuid in lowercase hex
fn short_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

// ============== Client -> Relay Messages ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The sender's current board, forwarded to the other players
    GameState { state: Value },
    /// The sender topped out. The score is relayed as sent, whatever its type.
    GameOver {
        #[serde(default = "default_score")]
        score: Value,
    },
}

impl ClientMessage {
    /// Envelope carrying an engine snapshot
    pub fn game_state(snapshot: &GameSnapshot) -> Result<Self, RelayError> {
        Ok(ClientMessage::GameState {
            state: serde_json::to_value(snapshot)?,
        })
    }

    pub fn game_over(score: u32) -> Self {
        ClientMessage::GameOver {
            score: Value::from(score),
        }
    }

    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn default_score() -> Value {
    Value::from(0)
}

/// Parse one inbound text frame.
///
/// Returns `Ok(None)` for well-formed envelopes of a type the relay does not
/// route; those are ignored rather than rejected.
pub fn parse_client_message(text: &str) -> Result<Option<ClientMessage>, RelayError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(RelayError::MissingType)?;

    if !matches!(kind, "game_state" | "game_over") {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

// ============== Relay -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent only to a player who just joined
    PlayerId { player_id: PlayerId },
    PlayerJoined {
        player_id: PlayerId,
        player_count: usize,
    },
    PlayerLeft {
        player_id: PlayerId,
        player_count: usize,
    },
    /// Another player's forwarded `game_state`
    OpponentState { player_id: PlayerId, state: Value },
    PlayerGameOver { player_id: PlayerId, score: Value },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse a line produced by the relay (client side)
pub fn parse_server_message(text: &str) -> Result<ServerMessage, RelayError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;
    use serde_json::json;

    #[test]
    fn ids_have_expected_length() {
        let room = RoomId::generate();
        let player = PlayerId::generate();
        assert_eq!(room.as_str().len(), 8);
        assert_eq!(player.as_str().len(), 6);
        assert!(room.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn parse_game_state_keeps_payload_opaque() {
        let text = r#"{"type":"game_state","state":{"anything":[1,2,3]}}"#;
        let msg = parse_client_message(text).unwrap();
        assert_eq!(
            msg,
            Some(ClientMessage::GameState {
                state: json!({"anything": [1, 2, 3]})
            })
        );
    }

    #[test]
    fn parse_game_over_defaults_score() {
        let msg = parse_client_message(r#"{"type":"game_over"}"#).unwrap();
        assert_eq!(msg, Some(ClientMessage::GameOver { score: json!(0) }));
    }

    #[test]
    fn parse_game_over_keeps_score_as_sent() {
        for score in [json!(12.5), json!(-3), json!(null), json!("lots")] {
            let text = json!({"type": "game_over", "score": score}).to_string();
            let msg = parse_client_message(&text).unwrap();
            assert_eq!(msg, Some(ClientMessage::GameOver { score }));
        }
    }

    #[test]
    fn unknown_type_is_ignored() {
        let msg = parse_client_message(r#"{"type":"chat","text":"hi"}"#).unwrap();
        assert_eq!(msg, None);
    }

    #[test]
    fn missing_type_is_rejected() {
        let err = parse_client_message(r#"{"state":{}}"#).unwrap_err();
        assert!(matches!(err, RelayError::MissingType));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_client_message("{not json").unwrap_err();
        assert!(matches!(err, RelayError::Json(_)));
    }

    #[test]
    fn known_type_with_bad_payload_is_rejected() {
        let err = parse_client_message(r#"{"type":"game_state"}"#).unwrap_err();
        assert!(matches!(err, RelayError::Json(_)));
    }

    #[test]
    fn server_messages_use_snake_case_tags() {
        let msg = ServerMessage::PlayerJoined {
            player_id: PlayerId::from("abc123"),
            player_count: 2,
        };
        let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(v, json!({"type": "player_joined", "player_id": "abc123", "player_count": 2}));
    }

    #[test]
    fn game_state_envelope_from_snapshot() {
        let engine = GameEngine::new(5);
        let msg = ClientMessage::game_state(&engine.snapshot()).unwrap();
        let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(v["type"], "game_state");
        assert_eq!(v["state"]["level"], 1);
        assert_eq!(v["state"]["board"].as_array().unwrap().len(), 20);
        assert!(v["state"]["held_piece"].is_null());
    }
}
