use serde::{Deserialize, Serialize};

use crate::models::ids::{PlayerId, RawPlayerId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPlayerRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub white_id: RawPlayerId,
    #[serde(default)]
    pub black_id: RawPlayerId,
    #[serde(default)]
    pub mode: String,
}

/// A move submission. Fields are kept as raw strings so that validation can
/// report exactly which one is malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub from: String, // e.g., "e2"
    #[serde(default)]
    pub to: String, // e.g., "e4"
    #[serde(default)]
    pub promotion: Option<String>, // e.g., "q" for queen
    /// Optional hint naming the submitting player.
    #[serde(default)]
    pub player_id: RawPlayerId,
}

impl MoveRequest {
    pub fn new(game_id: impl ToString, from: &str, to: &str) -> Self {
        MoveRequest {
            game_id: game_id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            promotion: None,
            player_id: RawPlayerId::default(),
        }
    }

    pub fn with_promotion(game_id: impl ToString, from: &str, to: &str, promotion: &str) -> Self {
        MoveRequest {
            promotion: Some(promotion.to_string()),
            ..MoveRequest::new(game_id, from, to)
        }
    }

    pub fn by_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = player_id.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResultRequest {
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResultRequest {
    #[serde(default)]
    pub player_a_id: RawPlayerId,
    #[serde(default)]
    pub player_b_id: RawPlayerId,
    pub result_a: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyRequest {
    #[serde(default)]
    pub player_id: RawPlayerId,
}

/// Pairs two named players, or the two longest-waiting ones when both ids
/// are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRequest {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub player_a_id: RawPlayerId,
    #[serde(default)]
    pub player_b_id: RawPlayerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_missing_fields_default_to_empty() {
        let request: MoveRequest = serde_json::from_str(r#"{"game_id": "4"}"#).unwrap();

        assert_eq!(request.game_id, "4");
        assert!(request.from.is_empty());
        assert!(request.to.is_empty());
        assert!(request.promotion.is_none());
        assert!(request.player_id.is_absent());
    }

    #[test]
    fn test_non_numeric_ids_still_deserialize() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"white_id": "abc", "black_id": 2, "mode": "SHORT"}"#)
                .unwrap();

        assert!(request.white_id.parse("white_id").is_err());
        assert_eq!(request.black_id.parse("black_id"), Ok(PlayerId(2)));
    }

    #[test]
    fn test_move_request_with_promotion() {
        let request = MoveRequest::with_promotion(9, "a7", "a8", "q");

        assert_eq!(request.game_id, "9");
        assert_eq!(request.promotion.as_deref(), Some("q"));
    }
}
