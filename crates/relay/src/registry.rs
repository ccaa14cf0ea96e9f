//! Room registry: tracks rooms, their players, and fans messages out.
//!
//! The registry is plain owned state. Rooms exist only between an explicit
//! join and the matching leave; nothing is tied to a socket's lifetime.
//! Callers sharing one registry across tasks wrap it in a lock.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::protocol::{parse_client_message, ClientMessage, PlayerId, RoomId, ServerMessage};

/// Outbound half of a player's connection: one JSON line per message
pub type PlayerSender = mpsc::UnboundedSender<String>;

#[derive(Debug)]
struct Member {
    id: PlayerId,
    tx: PlayerSender,
}

#[derive(Debug, Default)]
struct Room {
    members: Vec<Member>,
}

impl Room {
    fn contains(&self, player_id: &PlayerId) -> bool {
        self.members.iter().any(|m| &m.id == player_id)
    }
}

/// All active rooms, keyed by room id.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    config: RelayConfig,
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            rooms: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Create an empty room and return its id.
    ///
    /// The room stays until its last player leaves. A room nobody ever joins
    /// has to be dropped with [`RoomRegistry::remove_room`].
    pub fn create_room(&mut self) -> RoomId {
        let room_id = loop {
            let candidate = RoomId::generate();
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        self.rooms.insert(room_id.clone(), Room::default());
        tracing::info!(%room_id, "room created");
        room_id
    }

    /// Drop a room outright, disconnecting anyone still in it.
    ///
    /// Remaining players get no message; their senders are dropped, closing
    /// their channels. Returns how many players were removed.
    pub fn remove_room(&mut self, room_id: &RoomId) -> Result<usize, RelayError> {
        let room = self
            .rooms
            .remove(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;
        tracing::info!(%room_id, players = room.members.len(), "room removed");
        Ok(room.members.len())
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Players currently in a room, or `None` if it does not exist
    pub fn player_count(&self, room_id: &RoomId) -> Option<usize> {
        self.rooms.get(room_id).map(|room| room.members.len())
    }

    /// Add a player to a room and announce them.
    ///
    /// The new player receives their id first, then everyone in the room
    /// (the new player included) receives `player_joined`.
    pub fn join(&mut self, room_id: &RoomId, tx: PlayerSender) -> Result<PlayerId, RelayError> {
        if !self.rooms.contains_key(room_id) {
            if !self.config.create_on_join {
                return Err(RelayError::RoomNotFound(room_id.clone()));
            }
            self.rooms.insert(room_id.clone(), Room::default());
            tracing::info!(%room_id, "room created on join");
        }

        let max_players = self.config.max_players;
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;
        if room.members.len() >= max_players {
            return Err(RelayError::RoomFull(room_id.clone()));
        }

        let player_id = loop {
            let candidate = PlayerId::generate();
            if !room.contains(&candidate) {
                break candidate;
            }
        };
        room.members.push(Member {
            id: player_id.clone(),
            tx: tx.clone(),
        });
        let player_count = room.members.len();
        tracing::debug!(%room_id, %player_id, player_count, "player joined");

        let welcome = ServerMessage::PlayerId {
            player_id: player_id.clone(),
        };
        if tx.send(welcome.to_json()?).is_err() {
            tracing::debug!(%room_id, %player_id, "joining player already gone");
        }

        self.broadcast(
            room_id,
            &ServerMessage::PlayerJoined {
                player_id: player_id.clone(),
                player_count,
            },
            None,
        )?;

        Ok(player_id)
    }

    /// Remove a player and tell the others.
    ///
    /// The room is dropped once its last player leaves. Returns the number of
    /// players left behind.
    pub fn leave(&mut self, room_id: &RoomId, player_id: &PlayerId) -> Result<usize, RelayError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;
        let index = room
            .members
            .iter()
            .position(|m| &m.id == player_id)
            .ok_or_else(|| RelayError::PlayerNotFound(player_id.clone(), room_id.clone()))?;

        room.members.remove(index);
        let player_count = room.members.len();
        tracing::debug!(%room_id, %player_id, player_count, "player left");

        if player_count == 0 {
            self.rooms.remove(room_id);
            tracing::info!(%room_id, "room removed");
            return Ok(0);
        }

        self.broadcast(
            room_id,
            &ServerMessage::PlayerLeft {
                player_id: player_id.clone(),
                player_count,
            },
            None,
        )?;
        Ok(player_count)
    }

    /// Route one inbound text frame from `player_id`.
    ///
    /// - `game_state` goes to everyone else as `opponent_state`
    /// - `game_over` goes to everyone as `player_game_over`
    /// - other types are ignored
    pub fn handle_text(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        text: &str,
    ) -> Result<(), RelayError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;
        if !room.contains(player_id) {
            return Err(RelayError::PlayerNotFound(player_id.clone(), room_id.clone()));
        }

        match parse_client_message(text)? {
            Some(ClientMessage::GameState { state }) => {
                let forward = ServerMessage::OpponentState {
                    player_id: player_id.clone(),
                    state,
                };
                self.broadcast(room_id, &forward, Some(player_id))?;
            }
            Some(ClientMessage::GameOver { score }) => {
                tracing::debug!(%room_id, %player_id, %score, "player game over");
                let notice = ServerMessage::PlayerGameOver {
                    player_id: player_id.clone(),
                    score,
                };
                self.broadcast(room_id, &notice, None)?;
            }
            None => {
                tracing::debug!(%room_id, %player_id, "ignoring unrouted message");
            }
        }
        Ok(())
    }

    /// Send `message` to every player in the room except `exclude`.
    ///
    /// Players whose receiver is gone are skipped. Returns how many sends
    /// succeeded.
    pub fn broadcast(
        &self,
        room_id: &RoomId,
        message: &ServerMessage,
        exclude: Option<&PlayerId>,
    ) -> Result<usize, RelayError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;
        let line = message.to_json()?;

        let mut delivered = 0;
        for member in &room.members {
            if exclude == Some(&member.id) {
                continue;
            }
            if member.tx.send(line.clone()).is_ok() {
                delivered += 1;
            } else {
                tracing::debug!(%room_id, player_id = %member.id, "dropping message for closed receiver");
            }
        }
        Ok(delivered)
    }
}
