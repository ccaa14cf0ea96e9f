//! Relay configuration.

use std::env;

/// Players allowed in one room
pub const DEFAULT_MAX_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Room capacity; joins beyond it are rejected
    pub max_players: usize,
    /// Joining an unknown room id creates it instead of failing
    pub create_on_join: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            create_on_join: true,
        }
    }
}

impl RelayConfig {
    /// Read overrides from `TETRIS_RELAY_MAX_PLAYERS` and
    /// `TETRIS_RELAY_CREATE_ON_JOIN`; anything unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_players = lookup("TETRIS_RELAY_MAX_PLAYERS")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_players);

        let create_on_join = lookup("TETRIS_RELAY_CREATE_ON_JOIN")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.create_on_join);

        Self {
            max_players,
            create_on_join,
        }
    }
}
