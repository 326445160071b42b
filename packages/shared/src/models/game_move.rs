use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ids::{GameId, PlayerId};

/// One accepted move. Records are append-only; `id` is the 1-based position
/// of the move within its game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub game_id: GameId,
    pub id: u32,
    pub player_id: PlayerId,
    pub notation: String,
    pub played_at: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(
        game_id: GameId,
        id: u32,
        player_id: PlayerId,
        notation: &str,
        played_at: DateTime<Utc>,
    ) -> Self {
        MoveRecord {
            game_id,
            id,
            player_id,
            notation: notation.to_string(),
            played_at,
        }
    }
}
