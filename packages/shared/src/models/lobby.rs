use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ids::PlayerId;

/// A player waiting in the lobby to be paired.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LobbyEntry {
    pub player_id: PlayerId,
    pub joined_at: DateTime<Utc>,
}

impl LobbyEntry {
    pub fn new(player_id: PlayerId, joined_at: DateTime<Utc>) -> Self {
        LobbyEntry {
            player_id,
            joined_at,
        }
    }
}

/// Lobby entry joined with the player's profile, for display and pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReadyPlayer {
    pub player_id: PlayerId,
    pub username: String,
    pub rating: i32,
    pub joined_at: DateTime<Utc>,
}
