use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::game::{EndReason, GameMode, GameStatus};
use crate::models::ids::{GameId, PlayerId};
use crate::models::lobby::ReadyPlayer;
use crate::models::player::Player;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: GameId,
    pub mode: GameMode,
    pub time_limit: u32,
}

/// Match result as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    InProgress,
    Checkmate,
    Draw,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<PlayerId>,
    pub white_time: f64,
    pub black_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResultResponse {
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub player_id: PlayerId,
    pub old: i32,
    pub new: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_a: RatingDelta,
    pub player_b: RatingDelta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyListResponse {
    pub players: Vec<ReadyPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResponse {
    pub game_id: GameId,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub username: String,
    pub rating: i32,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        PlayerSummary {
            player_id: player.id,
            username: player.username.clone(),
            rating: player.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDetails {
    pub game_id: GameId,
    pub mode: GameMode,
    pub status: GameStatus,
    pub position: String,
    pub white: PlayerSummary,
    pub black: PlayerSummary,
    pub white_time: f64,
    pub black_time: f64,
    pub winner_id: Option<PlayerId>,
    pub end_reason: Option<EndReason>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
